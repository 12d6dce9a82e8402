//! Engine options.
//!
//! Options are a typed struct, but they can also be read and written by name
//! with JSON values. Only the names in [`OptionName`] are accepted; anything
//! else is a configuration error.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{EnumIter, EnumString, IntoEnumIterator};

use crate::error::ConfigError;

/// The recognised option names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum OptionName {
    /// Fail on missing fixtures and unsupported fixture types.
    Strict,
}

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// When `false`, a missing fixture renders as the empty string and an
    /// unsupported fixture renders as its type name.
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl Options {
    /// Reads an option by name.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::UnrecognisedOption` for an unknown name.
    pub fn get(&self, name: &str) -> Result<Value, ConfigError> {
        match parse_name(name)? {
            OptionName::Strict => Ok(Value::Bool(self.strict)),
        }
    }

    /// Writes an option by name.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::UnrecognisedOption` for an unknown name and
    /// `ConfigError::InvalidOptionValue` when the value has the wrong type.
    pub fn set(&mut self, name: &str, value: &Value) -> Result<(), ConfigError> {
        match parse_name(name)? {
            OptionName::Strict => {
                self.strict = value.as_bool().ok_or_else(|| ConfigError::InvalidOptionValue {
                    name: name.to_string(),
                    expected: "boolean",
                    actual: json_type_name(value),
                })?;
            }
        }
        Ok(())
    }

    /// Builds options from a name/value map. Names not present keep their
    /// default value.
    ///
    /// ## Errors
    ///
    /// Returns the first error [`Options::set`] reports.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        for (name, value) in map {
            options.set(name, value)?;
        }
        Ok(options)
    }

    /// Every option as a name/value map.
    pub fn to_map(&self) -> Map<String, Value> {
        OptionName::iter()
            .map(|name| {
                let value = match name {
                    OptionName::Strict => Value::Bool(self.strict),
                };
                (name.to_string(), value)
            })
            .collect()
    }
}

fn parse_name(name: &str) -> Result<OptionName, ConfigError> {
    OptionName::from_str(name).map_err(|_| ConfigError::UnrecognisedOption {
        name: name.to_string(),
    })
}

/// The JSON type of `value`, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_strict() {
        assert!(Options::default().strict);
    }

    #[test]
    fn test_get_and_set_by_name() {
        let mut options = Options::default();
        assert_eq!(options.get("strict").unwrap(), json!(true));
        options.set("strict", &json!(false)).unwrap();
        assert!(!options.strict);
        assert_eq!(options.get("strict").unwrap(), json!(false));
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let mut options = Options::default();
        assert_eq!(
            options.set("Strict", &json!(true)),
            Err(ConfigError::UnrecognisedOption {
                name: "Strict".to_string()
            })
        );
        assert!(options.get("verbose").is_err());
    }

    #[test]
    fn test_wrong_value_type_is_rejected() {
        let mut options = Options::default();
        let err = options.set("strict", &json!("no")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidOptionValue {
                name: "strict".to_string(),
                expected: "boolean",
                actual: "string"
            }
        );
        assert!(options.strict);
    }

    #[test]
    fn test_map_round_trip() {
        let map = json!({ "strict": false });
        let options = Options::from_map(map.as_object().unwrap()).unwrap();
        assert!(!options.strict);
        assert_eq!(Value::Object(options.to_map()), map);
    }

    #[test]
    fn test_from_empty_map_is_default() {
        assert_eq!(Options::from_map(&Map::new()).unwrap(), Options::default());
    }

    #[test]
    fn test_serde_shape() {
        let options: Options = serde_json::from_value(json!({ "strict": false })).unwrap();
        assert_eq!(serde_json::to_value(options).unwrap(), json!({ "strict": false }));
    }
}
