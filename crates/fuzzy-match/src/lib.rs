//! Fuzzy structural matching
//!
//! Checks that an observed [`Value`] satisfies an expected pattern. Patterns
//! are partial: keys missing from a mapping pattern are not checked, null
//! matches anything, and numbers only need to agree within a [`Tolerance`].
//!
//! # Example
//!
//! ```ignore
//! use fuzzy_match::{assert_almost_equal, MatchOptions, Value};
//! use serde_json::json;
//!
//! let observed = Value::from(json!({"a": 1.0001, "b": [1, 2, 3], "c": "extra"}));
//! let expected = Value::mapping([
//!     ("a", Value::from(1)),
//!     ("b", Value::set([3, 2, 1])),
//! ]);
//!
//! assert_almost_equal(&observed, &expected, &MatchOptions::new().places(3))?;
//! ```

mod error;
mod matcher;
mod options;
mod scalar;
mod tolerance;

pub use error::{MatchError, MatchResult};
pub use matcher::{assert_almost_equal, compare, Matcher};
pub use options::{MatchOptions, DEFAULT_MESSAGE_LIMIT};
pub use tolerance::{Tolerance, DEFAULT_PLACES};

pub use fuzzy_value::{Kind, Mapping, Predicate, Record, SerdeRecord, Shape, Table, Value};
