//! Suites: ordered cases sharing one run strategy.

use crate::case::Case;
use crate::errors::{GradingError, GradingResult};
use crate::format;
use crate::grading::TestSettings;
use crate::output::Output;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::ops::AddAssign;

/// Pass/fail/locked counts. Each case contributes to at most one counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub locked: usize,
}

impl Tally {
    /// No failed and no locked cases.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.locked == 0
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.passed += rhs.passed;
        self.failed += rhs.failed;
        self.locked += rhs.locked;
    }
}

pub trait Suite: Debug {
    /// The `type` discriminator this suite was declared with.
    fn kind(&self) -> &str;

    /// Whether this suite counts toward the score.
    fn scored(&self) -> bool;

    fn cases(&self) -> &[Box<dyn Case>];

    fn cases_mut(&mut self) -> &mut Vec<Box<dyn Case>>;

    /// Grade every case. `suite_number` is 1-indexed.
    ///
    /// Failing cases are counted, not returned as errors; `Err` is reserved
    /// for the environment breaking underneath the strategy.
    fn run(
        &mut self,
        test_name: &str,
        suite_number: usize,
        out: &mut Output,
    ) -> anyhow::Result<Tally>;

    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

/// Run one case inside its own log scope.
///
/// Emission is suspended for the duration, so nothing reaches the sink; the
/// caller decides whether to print the returned log.
pub fn run_case(
    test_name: &str,
    suite_number: usize,
    case: &mut dyn Case,
    case_number: usize,
    out: &mut Output,
) -> (bool, String) {
    let was_suspended = out.suspend();
    let log_id = out.new_log();

    format::print_line(out, '-');
    out.line(format!(
        "{} > Suite {} > Case {}",
        test_name, suite_number, case_number
    ));
    out.blank();

    let success = case.run(out);
    if success {
        out.line("-- OK! --");
    }

    out.resume(was_suspended);
    let log = out.remove_log(log_id).unwrap_or_default();
    tracing::debug!(test_name, suite_number, case_number, success, "case finished");

    (success, log)
}

/// Raw fields of one suite entry, the `type` key included.
pub type SuiteFields = serde_json::Map<String, serde_json::Value>;

/// Builds a suite from its raw declaration.
pub type SuiteFactory = Box<dyn Fn(&TestSettings, SuiteFields) -> GradingResult<Box<dyn Suite>>>;

/// Suite-type registry: discriminator string to constructor.
pub struct SuiteRegistry {
    factories: BTreeMap<String, SuiteFactory>,
}

impl SuiteRegistry {
    /// A registry with no strategies.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&TestSettings, SuiteFields) -> GradingResult<Box<dyn Suite>> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Validate and construct one raw suite entry. `index` is 0-based and
    /// only used for error reporting.
    pub fn build(
        &self,
        index: usize,
        settings: &TestSettings,
        raw: serde_json::Value,
    ) -> GradingResult<Box<dyn Suite>> {
        let serde_json::Value::Object(fields) = raw else {
            return Err(GradingError::MalformedSuite { index });
        };
        let kind = match fields.get("type") {
            Some(serde_json::Value::String(kind)) => kind.clone(),
            _ => return Err(GradingError::MissingSuiteType { index }),
        };
        let factory = self
            .factories
            .get(&kind)
            .ok_or_else(|| GradingError::UnknownSuiteType {
                index,
                kind: kind.clone(),
            })?;
        factory(settings, fields)
    }
}

impl Default for SuiteRegistry {
    /// A registry with the built-in strategies.
    fn default() -> Self {
        let mut registry = Self::empty();
        crate::suites::register_builtin(&mut registry);
        registry
    }
}

impl Debug for SuiteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteRegistry")
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Interact, LockState};

    #[derive(Debug)]
    struct Noisy {
        pass: bool,
    }

    impl Case for Noisy {
        fn run(&mut self, out: &mut Output) -> bool {
            out.line("checking...");
            self.pass
        }
        fn lock(&mut self, _hash_fn: &dyn Fn(&str) -> String) {}
        fn unlock(
            &mut self,
            _: &str,
            _: &str,
            _: &mut dyn Interact,
            _: &mut Output,
        ) -> anyhow::Result<bool> {
            Ok(true)
        }
        fn lock_state(&self) -> LockState {
            LockState::Unlocked
        }
        fn hidden(&self) -> bool {
            false
        }
        fn to_json(&self) -> serde_json::Result<serde_json::Value> {
            Ok(serde_json::json!({}))
        }
    }

    #[test]
    fn run_case_captures_header_and_affirmation() {
        let mut out = Output::memory();
        let mut case = Noisy { pass: true };
        let (ok, log) = run_case("q1", 2, &mut case, 3, &mut out);

        assert!(ok);
        assert_eq!(out.transcript(), "", "nothing emitted while capturing");
        assert_eq!(out.open_logs(), 0, "log scope must be detached");
        let expected = format!(
            "{}\nq1 > Suite 2 > Case 3\n\nchecking...\n-- OK! --\n",
            "-".repeat(format::LINE_WIDTH)
        );
        assert_eq!(log, expected);
        assert!(!out.is_suspended());
    }

    #[test]
    fn run_case_failure_has_no_affirmation() {
        let mut out = Output::memory();
        let mut case = Noisy { pass: false };
        let (ok, log) = run_case("q1", 1, &mut case, 1, &mut out);
        assert!(!ok);
        assert!(log.ends_with("checking...\n"));
        assert!(!log.contains("-- OK! --"));
    }

    #[test]
    fn tally_sums_and_cleanliness() {
        let mut t = Tally::default();
        t += Tally {
            passed: 2,
            failed: 0,
            locked: 0,
        };
        assert!(t.is_clean());
        t += Tally {
            passed: 0,
            failed: 0,
            locked: 1,
        };
        assert!(!t.is_clean());
        assert_eq!(
            t,
            Tally {
                passed: 2,
                failed: 0,
                locked: 1
            }
        );
    }

    #[test]
    fn build_rejects_malformed_entries() {
        let registry = SuiteRegistry::default();
        let settings = TestSettings::default();

        let err = registry
            .build(0, &settings, serde_json::json!(["concept"]))
            .unwrap_err();
        assert!(matches!(err, GradingError::MalformedSuite { index: 0 }));

        let err = registry
            .build(1, &settings, serde_json::json!({"cases": []}))
            .unwrap_err();
        assert!(matches!(err, GradingError::MissingSuiteType { index: 1 }));

        let err = registry
            .build(2, &settings, serde_json::json!({"type": 7, "cases": []}))
            .unwrap_err();
        assert!(matches!(err, GradingError::MissingSuiteType { index: 2 }));

        let err = registry
            .build(3, &settings, serde_json::json!({"type": "doctest", "cases": []}))
            .unwrap_err();
        match err {
            GradingError::UnknownSuiteType { index, kind } => {
                assert_eq!((index, kind.as_str()), (3, "doctest"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_registry_knows_concept() {
        let registry = SuiteRegistry::default();
        assert!(registry.contains("concept"));
        assert_eq!(registry.kinds().collect::<Vec<_>>(), vec!["concept"]);
    }
}
