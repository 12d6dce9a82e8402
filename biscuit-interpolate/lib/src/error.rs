//! Error types for the interpolation engine.

use thiserror::Error;

/// Errors raised while configuring an [`Interpolator`](crate::Interpolator).
///
/// These are always surfaced to the caller of the mutating operation and the
/// engine's state is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The option name is not one the engine recognises.
    #[error("unrecognised option '{name}'")]
    UnrecognisedOption {
        /// The rejected option name.
        name: String,
    },

    /// The option exists but the supplied value has the wrong type.
    #[error("option '{name}' expects a {expected} value, got {actual}")]
    InvalidOptionValue {
        /// The option being set.
        name: String,
        /// The JSON type the option accepts.
        expected: &'static str,
        /// The JSON type that was supplied.
        actual: &'static str,
    },

    /// A filter specifier is not exactly one ASCII alphabetic character.
    #[error("filter specifier must be a single alphabetic character, got '{specifier}'")]
    InvalidFilterSpecifier {
        /// The rejected specifier.
        specifier: String,
    },

    /// The same specifier appears more than once in an auto-filter list.
    #[error("auto filter '{specifier}' is listed more than once")]
    DuplicateAutoFilter {
        /// The repeated specifier.
        specifier: char,
    },

    /// An auto filter refers to a specifier with no registered filter.
    #[error("auto filter '{specifier}' is not a registered filter")]
    UnknownAutoFilter {
        /// The unresolved specifier.
        specifier: char,
    },
}

/// Errors returned by the interpolation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolateError {
    /// The engine was configured with an invalid option, filter or auto filter.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A placeholder names a fixture that was not supplied (strict mode only).
    #[error("fixture '{name}' not found")]
    FixtureNotFound {
        /// The missing fixture name.
        name: String,
    },

    /// A fixture cannot be converted to a string (strict mode only).
    #[error("fixture '{name}' has unsupported type {type_name}")]
    UnsupportedFixtureType {
        /// The fixture name.
        name: String,
        /// The fixture's type name, e.g. `array`.
        type_name: &'static str,
    },

    /// A filter specifier has no registered filter.
    ///
    /// Raised in both strict and non-strict mode.
    #[error("unrecognised filter specifier '{specifier}'")]
    UnrecognisedFilterSpecifier {
        /// The unresolved specifier.
        specifier: char,
    },
}

/// Broad classification of an [`InterpolateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
pub enum ErrorKind {
    ConfigurationError,
    FixtureNotFoundError,
    UnsupportedFixtureTypeError,
    UnrecognisedFilterSpecifierError,
}

impl InterpolateError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::ConfigurationError,
            Self::FixtureNotFound { .. } => ErrorKind::FixtureNotFoundError,
            Self::UnsupportedFixtureType { .. } => ErrorKind::UnsupportedFixtureTypeError,
            Self::UnrecognisedFilterSpecifier { .. } => {
                ErrorKind::UnrecognisedFilterSpecifierError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_each_variant() {
        let config: InterpolateError = ConfigError::UnrecognisedOption {
            name: "loud".to_string(),
        }
        .into();
        assert_eq!(config.kind(), ErrorKind::ConfigurationError);

        let missing = InterpolateError::FixtureNotFound {
            name: "0".to_string(),
        };
        assert_eq!(missing.kind(), ErrorKind::FixtureNotFoundError);

        let unsupported = InterpolateError::UnsupportedFixtureType {
            name: "list".to_string(),
            type_name: "array",
        };
        assert_eq!(unsupported.kind(), ErrorKind::UnsupportedFixtureTypeError);

        let filter = InterpolateError::UnrecognisedFilterSpecifier { specifier: 'Z' };
        assert_eq!(filter.kind(), ErrorKind::UnrecognisedFilterSpecifierError);
    }

    #[test]
    fn test_kind_display_uses_variant_name() {
        assert_eq!(ErrorKind::FixtureNotFoundError.to_string(), "FixtureNotFoundError");
        let name: &'static str = ErrorKind::ConfigurationError.into();
        assert_eq!(name, "ConfigurationError");
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = InterpolateError::FixtureNotFound {
            name: "user.name".to_string(),
        };
        assert_eq!(err.to_string(), "fixture 'user.name' not found");

        let err: InterpolateError = ConfigError::DuplicateAutoFilter { specifier: 'u' }.into();
        assert_eq!(
            err.to_string(),
            "configuration error: auto filter 'u' is listed more than once"
        );
    }
}
