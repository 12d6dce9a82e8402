//! Filters and the specifier registry.
//!
//! A [`Filter`] is a shared `&str -> String` transform. A [`FilterRegistry`]
//! maps single-letter specifiers to filters and is owned by one
//! [`Interpolator`](crate::Interpolator); there is no global registry.
//!
//! ## Examples
//!
//! ```
//! use biscuit_interpolate::{Filter, FilterRegistry};
//!
//! let mut registry = FilterRegistry::default();
//! registry.insert('x', |s: &str| s.chars().rev().collect::<String>()).unwrap();
//!
//! assert_eq!(registry.get('x').unwrap().apply("abc"), "cba");
//! assert_eq!(registry.get('u').unwrap().apply("abc"), "ABC");
//!
//! // '-' is reserved for suppressing auto filters
//! assert!(registry.insert('-', Filter::new(|s: &str| s.to_string())).is_err());
//! ```

pub mod builtin;
pub mod entities;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, InterpolateError};

pub use builtin::{BUILTIN_FILTERS, BuiltinFilter};

/// The specifier that disables auto filters for one placeholder.
pub const SUPPRESS_AUTO_FILTERS: char = '-';

/// A string transform applied by a filter specifier.
#[derive(Clone)]
pub struct Filter(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Filter {
    pub fn new<F>(filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(filter))
    }

    pub fn apply(&self, input: &str) -> String {
        (self.0)(input)
    }
}

impl<F> From<F> for Filter
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn from(filter: F) -> Self {
        Self::new(filter)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Checks that `specifier` can key a filter: one ASCII letter.
pub fn validate_specifier(specifier: char) -> Result<char, ConfigError> {
    if specifier.is_ascii_alphabetic() {
        Ok(specifier)
    } else {
        Err(ConfigError::InvalidFilterSpecifier {
            specifier: specifier.to_string(),
        })
    }
}

/// Parses a specifier given as a string, which must hold exactly one ASCII
/// letter.
pub fn parse_specifier(specifier: &str) -> Result<char, ConfigError> {
    let mut chars = specifier.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => validate_specifier(ch).map_err(|_| invalid(specifier)),
        _ => Err(invalid(specifier)),
    }
}

fn invalid(specifier: &str) -> ConfigError {
    ConfigError::InvalidFilterSpecifier {
        specifier: specifier.to_string(),
    }
}

/// Specifier to filter mapping.
///
/// `Default` yields the builtin table; [`FilterRegistry::empty`] yields a
/// registry with no filters.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: BTreeMap<char, Filter>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self {
            filters: BUILTIN_FILTERS
                .iter()
                .map(|builtin| (builtin.specifier, Filter::new(builtin.apply)))
                .collect(),
        }
    }
}

impl FilterRegistry {
    pub fn empty() -> Self {
        Self {
            filters: BTreeMap::new(),
        }
    }

    /// Builds a registry from `(specifier, filter)` pairs.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidFilterSpecifier` for the first specifier
    /// that is not a single ASCII letter.
    pub fn from_filters<I, F>(filters: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (char, F)>,
        F: Into<Filter>,
    {
        let mut registry = Self::empty();
        for (specifier, filter) in filters {
            registry.insert(specifier, filter)?;
        }
        Ok(registry)
    }

    /// Registers `filter` under `specifier`, returning the filter it replaced.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidFilterSpecifier` unless `specifier` is a
    /// single ASCII letter.
    pub fn insert<F>(&mut self, specifier: char, filter: F) -> Result<Option<Filter>, ConfigError>
    where
        F: Into<Filter>,
    {
        let specifier = validate_specifier(specifier)?;
        Ok(self.filters.insert(specifier, filter.into()))
    }

    /// Looks up the filter for `specifier`.
    ///
    /// ## Errors
    ///
    /// Returns `InterpolateError::UnrecognisedFilterSpecifier` when nothing is
    /// registered under `specifier`.
    pub fn get(&self, specifier: char) -> Result<&Filter, InterpolateError> {
        self.filters
            .get(&specifier)
            .ok_or(InterpolateError::UnrecognisedFilterSpecifier { specifier })
    }

    pub fn remove(&mut self, specifier: char) -> Option<Filter> {
        self.filters.remove(&specifier)
    }

    pub fn contains(&self, specifier: char) -> bool {
        self.filters.contains_key(&specifier)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Registered specifiers in ascending order.
    pub fn specifiers(&self) -> impl Iterator<Item = char> + '_ {
        self.filters.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Filter)> {
        self.filters.iter().map(|(specifier, filter)| (*specifier, filter))
    }
}
