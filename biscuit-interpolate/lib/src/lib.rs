//! Placeholder interpolation with escaping, fixtures and filter chains.
//!
//! Templates contain `%{name}` or `%{name|specifiers}` placeholders. Each
//! placeholder is replaced by the fixture called `name`, passed through the
//! filters named by its specifier letters and then through the engine's auto
//! filters. A single pass is made over the template; substituted text is
//! never interpolated again.
//!
//! ## Core Types
//!
//! - [`Interpolator`] - The engine: options, filter registry, auto filters
//! - [`Fixtures`] / [`Fixture`] - Values available to placeholders
//! - [`FilterRegistry`] / [`Filter`] - Specifier to transform mapping
//! - [`Options`] - Engine options (`strict`)
//! - [`InterpolateError`] / [`ConfigError`] - Failure modes
//!
//! ## Escaping
//!
//! An odd number of backslashes before `%{` escapes the placeholder; an even
//! number does not. Either way the backslash run is halved in the output.
//!
//! ## Examples
//!
//! ```
//! use biscuit_interpolate::{Fixtures, Interpolator};
//!
//! let engine = Interpolator::new();
//! let fixtures = Fixtures::positional(["dana"]).with("greeting", "hello");
//!
//! let result = engine.render("%{greeting|u}, %{0}!", &fixtures).unwrap();
//! assert_eq!(result, "HELLO, dana!");
//!
//! let result = engine.render(r"literal \%{0}", &fixtures).unwrap();
//! assert_eq!(result, "literal %{0}");
//!
//! // Strict mode (the default) rejects missing fixtures
//! assert!(engine.render("%{1}", &fixtures).is_err());
//! let lenient = Interpolator::new().strict(false);
//! assert_eq!(lenient.render("[%{1}]", &fixtures).unwrap(), "[]");
//! ```

mod engine;
mod error;
pub mod filter;
mod fixture;
mod options;
pub mod syntax;

pub use engine::Interpolator;
pub use error::{ConfigError, ErrorKind, InterpolateError};
pub use filter::{BUILTIN_FILTERS, BuiltinFilter, Filter, FilterRegistry, SUPPRESS_AUTO_FILTERS};
pub use fixture::{Fixture, Fixtures};
pub use options::{OptionName, Options};
