//! The interpolation engine.
//!
//! An [`Interpolator`] owns its options, filter registry and auto-filter list.
//! Configure it once and render any number of templates with it; rendering
//! only borrows the engine, so a configured engine can be shared across
//! threads behind an `Arc`.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::{ConfigError, InterpolateError};
use crate::filter::{self, Filter, FilterRegistry, SUPPRESS_AUTO_FILTERS};
use crate::fixture::Fixtures;
use crate::options::Options;
use crate::syntax::{self, Segment};

/// Renders `%{name|specifiers}` placeholders against a fixture set.
///
/// ## Examples
///
/// ```
/// use biscuit_interpolate::{Fixtures, Interpolator};
///
/// let mut engine = Interpolator::new();
/// engine.set_auto_filters("t".chars()).unwrap();
///
/// let fixtures = Fixtures::positional(["  dana  "]);
/// assert_eq!(engine.render("Hi %{0|u}!", &fixtures).unwrap(), "Hi DANA!");
/// assert_eq!(engine.render("[%{0|-}]", &fixtures).unwrap(), "[  dana  ]");
/// assert_eq!(engine.render(r"\%{0}", &fixtures).unwrap(), "%{0}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    options: Options,
    filters: FilterRegistry,
    auto_filters: Vec<char>,
}

impl Interpolator {
    /// Creates a strict engine with the builtin filters and no auto filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of the `strict` option.
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Builder form of [`set_filters`](Self::set_filters).
    pub fn with_filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    // --- options ---------------------------------------------------------

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replaces all options. Names missing from `options` revert to their
    /// defaults.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::UnrecognisedOption` or
    /// `ConfigError::InvalidOptionValue`; the current options are kept.
    pub fn set_options(&mut self, options: &Map<String, Value>) -> Result<(), InterpolateError> {
        self.options = Options::from_map(options)?;
        Ok(())
    }

    /// All options as a name/value map.
    pub fn options_map(&self) -> Map<String, Value> {
        self.options.to_map()
    }

    /// Sets a single option by name.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::UnrecognisedOption` or
    /// `ConfigError::InvalidOptionValue`.
    pub fn set_option(&mut self, name: &str, value: Value) -> Result<(), InterpolateError> {
        self.options.set(name, &value)?;
        Ok(())
    }

    /// Reads a single option by name.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::UnrecognisedOption` for an unknown name.
    pub fn option(&self, name: &str) -> Result<Value, InterpolateError> {
        Ok(self.options.get(name)?)
    }

    // --- filters ---------------------------------------------------------

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Replaces the filter registry. `None` restores the builtin filters;
    /// pass `Some(FilterRegistry::empty())` to remove every filter.
    ///
    /// Auto filters are not revalidated; one whose filter is gone fails at
    /// render time.
    pub fn set_filters(&mut self, filters: Option<FilterRegistry>) {
        self.filters = filters.unwrap_or_default();
    }

    /// Registers or replaces one filter.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidFilterSpecifier` unless `specifier` is a
    /// single ASCII letter.
    pub fn set_filter<F>(&mut self, specifier: char, filter: F) -> Result<(), InterpolateError>
    where
        F: Into<Filter>,
    {
        self.filters.insert(specifier, filter)?;
        Ok(())
    }

    /// Returns the filter registered under `specifier`.
    ///
    /// ## Errors
    ///
    /// Returns `InterpolateError::UnrecognisedFilterSpecifier` when nothing is
    /// registered under `specifier`.
    pub fn filter(&self, specifier: char) -> Result<&Filter, InterpolateError> {
        self.filters.get(specifier)
    }

    pub fn remove_filter(&mut self, specifier: char) -> Option<Filter> {
        self.filters.remove(specifier)
    }

    // --- auto filters ----------------------------------------------------

    pub fn auto_filters(&self) -> &[char] {
        &self.auto_filters
    }

    /// Replaces the auto-filter list. An empty iterator clears it.
    ///
    /// ## Errors
    ///
    /// Nothing changes if any specifier is not a single ASCII letter (this
    /// includes `-`), is repeated, or has no registered filter.
    pub fn set_auto_filters<I>(&mut self, specifiers: I) -> Result<(), InterpolateError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut auto_filters = Vec::new();

        for specifier in specifiers {
            let specifier = filter::validate_specifier(specifier)?;
            if auto_filters.contains(&specifier) {
                return Err(ConfigError::DuplicateAutoFilter { specifier }.into());
            }
            if !self.filters.contains(specifier) {
                return Err(ConfigError::UnknownAutoFilter { specifier }.into());
            }
            auto_filters.push(specifier);
        }

        self.auto_filters = auto_filters;
        Ok(())
    }

    pub fn clear_auto_filters(&mut self) {
        self.auto_filters.clear();
    }

    // --- rendering -------------------------------------------------------

    /// Substitutes every placeholder in `template`.
    ///
    /// The template is returned borrowed when it contains no placeholder.
    /// Substituted values are never scanned again.
    ///
    /// ## Errors
    ///
    /// - `InterpolateError::FixtureNotFound` (strict mode only)
    /// - `InterpolateError::UnsupportedFixtureType` (strict mode only)
    /// - `InterpolateError::UnrecognisedFilterSpecifier`
    #[tracing::instrument(
        level = "trace",
        skip(self, fixtures),
        fields(strict = self.options.strict)
    )]
    pub fn render<'a>(
        &self,
        template: &'a str,
        fixtures: &Fixtures,
    ) -> Result<Cow<'a, str>, InterpolateError> {
        if !template.contains(syntax::OPEN) {
            return Ok(Cow::Borrowed(template));
        }

        let segments = syntax::tokenize(template);
        if !segments.iter().any(|s| matches!(s, Segment::Placeholder(_))) {
            return Ok(Cow::Borrowed(template));
        }

        let mut output = String::with_capacity(template.len());

        for segment in segments {
            let placeholder = match segment {
                Segment::Literal(text) => {
                    output.push_str(text);
                    continue;
                }
                Segment::Placeholder(placeholder) => placeholder,
            };

            output.extend(std::iter::repeat_n('\\', placeholder.backslashes / 2));

            if placeholder.is_escaped() {
                tracing::trace!(source = placeholder.source, "escaped placeholder");
                output.push_str(placeholder.source);
                continue;
            }

            let value = fixtures.resolve(placeholder.name, self.options.strict)?;
            let value = self.apply_filters(value, placeholder.specifiers)?;
            tracing::trace!(
                name = placeholder.name,
                specifiers = placeholder.specifiers,
                "substituted placeholder"
            );
            output.push_str(&value);
        }

        Ok(Cow::Owned(output))
    }

    /// Runs the placeholder's specifiers in order, then the auto filters
    /// unless a `-` appeared among the specifiers.
    fn apply_filters(
        &self,
        mut value: String,
        specifiers: &str,
    ) -> Result<String, InterpolateError> {
        let mut suppress_auto = false;

        for specifier in specifiers.chars() {
            if specifier == SUPPRESS_AUTO_FILTERS {
                suppress_auto = true;
                continue;
            }
            value = self.filters.get(specifier)?.apply(&value);
        }

        if !suppress_auto {
            for &specifier in &self.auto_filters {
                value = self.filters.get(specifier)?.apply(&value);
            }
        }

        Ok(value)
    }
}
