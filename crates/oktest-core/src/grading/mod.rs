//! Graded tests: the top-level unit that owns suites, scores them, and
//! carries them through the lock/unlock lifecycle.

mod io;
mod lifecycle;

pub use io::{parse_test_file, render_test_file, TEST_FILE_PREFIX};

use crate::errors::GradingResult;
use crate::format;
use crate::output::Output;
use crate::suite::{Suite, SuiteRegistry, Tally};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Run-mode flags handed to every suite at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSettings {
    pub verbose: bool,
    pub interactive: bool,
    pub timeout: Option<Duration>,
}

/// Deserialized form of a backing file, before suites are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDeclaration {
    pub name: String,
    pub points: f64,
    #[serde(default)]
    pub suites: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields of the base test schema this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug)]
pub struct GradedTest {
    pub name: String,
    pub points: f64,
    pub suites: Vec<Box<dyn Suite>>,
    pub description: Option<String>,
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub settings: TestSettings,
    pub assignment_name: String,
    /// Backing file written by [`GradedTest::dump`].
    pub file: PathBuf,
}

impl GradedTest {
    /// Resolve every suite entry through `registry`. Fails on the first
    /// malformed entry; nothing is deferred to run time.
    pub fn from_declaration(
        decl: TestDeclaration,
        file: impl Into<PathBuf>,
        registry: &SuiteRegistry,
        assignment_name: impl Into<String>,
        settings: TestSettings,
    ) -> GradingResult<Self> {
        let suites = decl
            .suites
            .into_iter()
            .enumerate()
            .map(|(i, raw)| registry.build(i, &settings, raw))
            .collect::<GradingResult<Vec<_>>>()?;

        Ok(Self {
            name: decl.name,
            points: decl.points,
            suites,
            description: decl.description,
            extra: decl.extra,
            settings,
            assignment_name: assignment_name.into(),
            file: file.into(),
        })
    }

    /// Namespace for unlock identities, so equally named tests in different
    /// assignments unlock independently.
    pub fn unique_id_prefix(&self) -> String {
        format!("{}\n{}", self.assignment_name, self.name)
    }

    pub fn case_count(&self) -> usize {
        self.suites.iter().map(|s| s.cases().len()).sum()
    }

    /// Run suites in order and aggregate their tallies.
    ///
    /// Outside verbose mode the run stops after the first suite that leaves
    /// any failed or locked case in the aggregate.
    pub fn run(&mut self, out: &mut Output) -> anyhow::Result<Tally> {
        let mut tally = Tally::default();
        for (i, suite) in self.suites.iter_mut().enumerate() {
            let results = suite.run(&self.name, i + 1, out)?;
            debug!(
                test = %self.name,
                suite = i + 1,
                kind = suite.kind(),
                ?results,
                "suite finished"
            );
            tally += results;

            if !self.settings.verbose && !tally.is_clean() {
                warn!(test = %self.name, suite = i + 1, "stopping at first failed suite");
                break;
            }
        }

        if tally.locked > 0 {
            out.blank();
            out.line("There are still locked tests! Use the -u option to unlock them");
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.blank();
            out.line(description);
            out.blank();
        }
        Ok(tally)
    }

    /// Points earned, spread evenly over scored suites. A suite earns its
    /// share only if none of its cases failed or are locked.
    pub fn score(&mut self, out: &mut Output) -> anyhow::Result<f64> {
        let mut passed = 0usize;
        let mut total = 0usize;
        for (i, suite) in self.suites.iter_mut().enumerate() {
            if !suite.scored() {
                continue;
            }
            total += 1;
            let results = suite.run(&self.name, i + 1, out)?;
            if results.is_clean() {
                passed += 1;
            }
        }

        let score = if total > 0 {
            passed as f64 * self.points / total as f64
        } else {
            0.0
        };
        debug!(test = %self.name, passed, total, score, "scored");

        format::print_progress_bar(out, &self.name, passed, total - passed, 0);
        out.blank();
        Ok(score)
    }

    /// Full declared state, as written by [`GradedTest::dump`].
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut map = self.extra.clone();
        map.insert("name".into(), serde_json::Value::String(self.name.clone()));
        map.insert("points".into(), serde_json::to_value(self.points)?);
        let suites = self
            .suites
            .iter()
            .map(|s| s.to_json())
            .collect::<serde_json::Result<Vec<_>>>()?;
        map.insert("suites".into(), serde_json::Value::Array(suites));
        if let Some(description) = &self.description {
            map.insert(
                "description".into(),
                serde_json::Value::String(description.clone()),
            );
        }
        Ok(serde_json::Value::Object(map))
    }
}
