//! Test-case helpers built on fuzzy matching
//!
//! - [`FuzzyTestCase`] and [`assert_fuzzy!`] - pattern assertions with
//!   per-test defaults
//! - [`check_raises`] / [`check_panics`] - the block must fail with an
//!   expected [`Problem`]
//! - [`ErrorReporter`] and [`LogCapture`] - log failed tests, capture the
//!   log lines in memory
//! - [`Mockable`] - functions tests can replace for the life of a guard
//! - [`FuzzyConfig`] - defaults from the environment or a YAML file

mod capture;
pub mod config;
mod error;
mod mocks;
mod raises;
mod reporting;
mod testcase;

pub use capture::{CaptureWriter, LogCapture};
pub use config::{load_config, load_config_str, FuzzyConfig};
pub use error::{
    ConfigError, ConfigResult, MockError, MockResult, PanicError, RaisesError, RaisesResult,
    SkipTest,
};
pub use mocks::{MockGuard, Mockable};
pub use raises::{assert_panics, assert_raises, check_panics, check_raises, Problem};
pub use reporting::ErrorReporter;
pub use testcase::FuzzyTestCase;

pub use fuzzy_match::{
    assert_almost_equal, compare, MatchError, MatchOptions, MatchResult, Predicate, Record,
    SerdeRecord, Table, Tolerance, Value,
};
