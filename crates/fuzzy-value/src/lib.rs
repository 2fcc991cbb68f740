//! Loosely-typed value trees for fuzzy structural assertions
//!
//! This crate provides the data the matcher works on:
//!
//! - [`Value`] - a JSON-like tree extended with dates, sets, opaque records,
//!   predicates and an explicit "must be absent" marker
//! - [`Shape`] - the one-time classification of a value used for dispatch
//! - [`Record`] - attribute access for opaque objects ([`SerdeRecord`],
//!   [`Table`])
//! - [`Predicate`] - a callable pattern
//!
//! # Example
//!
//! ```ignore
//! use fuzzy_value::Value;
//! use serde_json::json;
//!
//! let observed = Value::from(json!({"a": 1, "b": [1, 2, 3]}));
//! let pattern = Value::mapping([("b", Value::set([3, 2, 1]))]);
//! ```

mod dates;
mod error;
mod predicate;
mod record;
mod render;
mod shape;
mod value;

pub use dates::{epoch_seconds, parse_date};
pub use error::{BoxError, ValueError, ValueResult};
pub use predicate::Predicate;
pub use record::{Record, SerdeRecord, Table};
pub use render::{quote, render, render_number};
pub use shape::{Kind, Shape};
pub use value::{Mapping, Value};
