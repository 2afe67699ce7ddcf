//! Test execution core for ok-style grading tests.
//!
//! A [`GradedTest`] owns an ordered list of [`Suite`]s, each holding ordered
//! [`Case`]s. The crate provides:
//!
//! - running suites into pass/fail/locked tallies, with fail-fast outside verbose mode
//! - scoring, with points spread evenly over scored suites
//! - locking cases for shipment and unlocking them through an interactive exchange
//! - reading and writing backing files of the form `test = <json>`
//!
//! # Quick Start
//!
//! ```no_run
//! use oktest_core::{GradedTest, Output, SuiteRegistry, TestSettings};
//!
//! # fn example() -> anyhow::Result<()> {
//! let registry = SuiteRegistry::default();
//! let mut test = GradedTest::load("tests/q1.py", &registry, "lab00", TestSettings::default())?;
//! let mut out = Output::stdout();
//! let tally = test.run(&mut out)?;
//! println!("passed={} failed={} locked={}", tally.passed, tally.failed, tally.locked);
//! # Ok(())
//! # }
//! ```
//!
//! Suite strategies are pluggable through [`SuiteRegistry::register`]; the
//! default registry knows the built-in `concept` strategy.

pub mod case;
pub mod config;
pub mod errors;
pub mod format;
pub mod grading;
pub mod hashing;
pub mod output;
pub mod suite;
pub mod suites;

pub use case::{Case, Interact, LockState, UnlockRequest};
pub use config::{load_config, GraderConfig, SUPPORTED_CONFIG_VERSION};
pub use errors::{GradingError, GradingResult};
pub use grading::{GradedTest, TestDeclaration, TestSettings};
pub use hashing::AnswerKey;
pub use output::{LogId, Output};
pub use suite::{run_case, Suite, SuiteFactory, SuiteFields, SuiteRegistry, Tally};
