//! Fixture values and name resolution.
//!
//! A [`Fixtures`] set maps placeholder names to [`Fixture`] values. Positional
//! fixtures are stored under their index as a decimal string, so `%{0}` reads
//! the first positional value.
//!
//! ## Examples
//!
//! ```
//! use biscuit_interpolate::{Fixture, Fixtures};
//!
//! let positional = Fixtures::from(vec!["foo", "bar"]);
//! assert_eq!(positional.get("1").and_then(Fixture::to_interpolated), Some("bar".to_string()));
//!
//! let named: Fixtures = [("user", "dana"), ("role", "admin")].into_iter().collect();
//! assert!(named.contains("user"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::InterpolateError;

/// A single value available for substitution.
#[derive(Clone)]
pub enum Fixture {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Any value with a string conversion.
    Display(Arc<dyn fmt::Display + Send + Sync>),
    /// A sequence; not convertible to a string.
    List(Vec<Fixture>),
    /// A record; not convertible to a string.
    Map(BTreeMap<String, Fixture>),
}

impl Fixture {
    /// Wraps any `Display` value as a string-convertible fixture.
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::Display(Arc::new(value))
    }

    /// The name of this fixture's type, as reported in errors and substituted
    /// for unsupported values in non-strict mode.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Display(_) | Self::Map(_) => "object",
            Self::List(_) => "array",
        }
    }

    /// Converts the fixture to the string substituted for it.
    ///
    /// Returns `None` for lists and maps, which have no string form.
    pub fn to_interpolated(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::UInt(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Display(value) => Some(value.to_string()),
            Self::List(_) | Self::Map(_) => None,
        }
    }
}

impl fmt::Debug for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::UInt(n) => f.debug_tuple("UInt").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Display(value) => f.debug_tuple("Display").field(&value.to_string()).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
        }
    }
}

impl From<&str> for Fixture {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Fixture {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Fixture {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! fixture_from_int {
    ($variant:ident => $($ty:ty),+) => {
        $(
            impl From<$ty> for Fixture {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

fixture_from_int!(Int => i8, i16, i32, i64);
fixture_from_int!(UInt => u8, u16, u32, u64);

impl From<f32> for Fixture {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for Fixture {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Fixture>> From<Option<T>> for Fixture {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Fixture>> From<Vec<T>> for Fixture {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Fixture {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// The set of values a template is rendered against.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    values: HashMap<String, Fixture>,
}

impl Fixtures {
    /// Creates an empty fixture set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fixture set keyed by position (`"0"`, `"1"`, ...).
    pub fn positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Fixture>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value.into()))
            .collect()
    }

    /// Inserts or replaces a fixture, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Fixture>,
    ) -> Option<Fixture> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Fixture>) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a fixture by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&Fixture> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves `name` to the string handed to the filter chain.
    ///
    /// In strict mode a missing fixture or a list/map value is an error. In
    /// non-strict mode a missing fixture becomes the empty string and a
    /// list/map becomes its type name.
    ///
    /// ## Errors
    ///
    /// - `InterpolateError::FixtureNotFound` when strict and `name` is absent.
    /// - `InterpolateError::UnsupportedFixtureType` when strict and the value
    ///   has no string form.
    pub fn resolve(&self, name: &str, strict: bool) -> Result<String, InterpolateError> {
        let Some(fixture) = self.get(name) else {
            if strict {
                return Err(InterpolateError::FixtureNotFound {
                    name: name.to_string(),
                });
            }
            tracing::debug!(name, "fixture not found, substituting empty string");
            return Ok(String::new());
        };

        match fixture.to_interpolated() {
            Some(value) => Ok(value),
            None if strict => Err(InterpolateError::UnsupportedFixtureType {
                name: name.to_string(),
                type_name: fixture.type_name(),
            }),
            None => {
                let type_name = fixture.type_name();
                tracing::debug!(
                    name,
                    type_name,
                    "unsupported fixture type, substituting type name"
                );
                Ok(type_name.to_string())
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Fixtures
where
    K: Into<String>,
    V: Into<Fixture>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<T: Into<Fixture>> From<Vec<T>> for Fixtures {
    fn from(values: Vec<T>) -> Self {
        Self::positional(values)
    }
}

/// Arrays become positional fixtures and objects named fixtures. Any other
/// JSON value becomes the single positional fixture `"0"`.
impl From<Value> for Fixtures {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::positional(items),
            Value::Object(entries) => entries.into_iter().collect(),
            other => Self::positional([other]),
        }
    }
}
