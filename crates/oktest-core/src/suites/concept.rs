//! `concept` suites: conceptual questions with a single expected answer.
//!
//! A concept case always passes once it is unlocked; the grading value is in
//! the unlock exchange, where the student has to produce the answer.

use crate::case::{unique_case_id, Case, Interact, LockState, UnlockRequest};
use crate::errors::{GradingError, GradingResult};
use crate::grading::TestSettings;
use crate::output::Output;
use crate::suite::{run_case, Suite, SuiteFields, Tally};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const KIND: &str = "concept";

fn default_scored() -> bool {
    true
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConceptCase {
    pub question: String,
    /// Plain answer, or its hash while locked.
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "LockState::is_lockable")]
    pub locked: LockState,
}

impl ConceptCase {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            choices: None,
            hidden: false,
            locked: LockState::Lockable,
        }
    }

    fn print_question(&self, out: &mut Output) {
        out.line(format!("Q: {}", self.question));
        if let Some(choices) = &self.choices {
            for (i, choice) in choices.iter().enumerate() {
                out.line(format!("    {}) {}", choice_label(i), choice));
            }
        }
    }
}

fn choice_label(index: usize) -> char {
    // Past 'z' labels stop being meaningful; fall back to '?'.
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'a' + i))
        .unwrap_or('?')
}

impl Case for ConceptCase {
    fn run(&mut self, out: &mut Output) -> bool {
        self.print_question(out);
        out.line(format!("A: {}", self.answer));
        out.blank();
        true
    }

    fn lock(&mut self, hash_fn: &dyn Fn(&str) -> String) {
        self.answer = hash_fn(&self.answer);
        self.locked = LockState::Locked;
    }

    fn unlock(
        &mut self,
        unique_id_prefix: &str,
        case_id: &str,
        interact: &mut dyn Interact,
        out: &mut Output,
    ) -> anyhow::Result<bool> {
        self.print_question(out);
        out.blank();

        let unique_id = unique_case_id(unique_id_prefix, case_id);
        let request = UnlockRequest {
            unique_id: &unique_id,
            case_id,
            question: &self.question,
            locked_answers: std::slice::from_ref(&self.answer),
            choices: self.choices.as_deref(),
        };
        let revealed = interact.interact(&request, out)?;

        match revealed.and_then(|answers| answers.into_iter().next()) {
            Some(answer) => {
                self.answer = answer;
                self.locked = LockState::Unlocked;
                debug!(case_id, "concept case unlocked");
                Ok(true)
            }
            None => {
                warn!(case_id, "unlock abandoned; case stays locked");
                out.line("-- Case remains locked --");
                out.blank();
                Ok(false)
            }
        }
    }

    fn lock_state(&self) -> LockState {
        self.locked
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConceptSuiteDecl {
    #[serde(rename = "type")]
    _kind: String,
    #[serde(default = "default_scored")]
    scored: bool,
    #[serde(default)]
    cases: Vec<ConceptCase>,
}

#[derive(Debug)]
pub struct ConceptSuite {
    pub scored: bool,
    /// Run-mode flags from the owning test. Concept cases execute no code,
    /// so only `verbose` affects them.
    pub settings: TestSettings,
    pub cases: Vec<Box<dyn Case>>,
}

impl ConceptSuite {
    pub fn new(settings: &TestSettings, cases: Vec<ConceptCase>) -> Self {
        Self {
            scored: true,
            settings: settings.clone(),
            cases: cases
                .into_iter()
                .map(|c| Box::new(c) as Box<dyn Case>)
                .collect(),
        }
    }

    pub fn from_declaration(
        settings: &TestSettings,
        fields: SuiteFields,
    ) -> GradingResult<Box<dyn Suite>> {
        let decl: ConceptSuiteDecl = serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| GradingError::invalid_declaration(format!("concept suite: {}", e)))?;
        let mut suite = Self::new(settings, decl.cases);
        suite.scored = decl.scored;
        Ok(Box::new(suite))
    }
}

impl Suite for ConceptSuite {
    fn kind(&self) -> &str {
        KIND
    }

    fn scored(&self) -> bool {
        self.scored
    }

    fn cases(&self) -> &[Box<dyn Case>] {
        &self.cases
    }

    fn cases_mut(&mut self) -> &mut Vec<Box<dyn Case>> {
        &mut self.cases
    }

    fn run(
        &mut self,
        test_name: &str,
        suite_number: usize,
        out: &mut Output,
    ) -> anyhow::Result<Tally> {
        let mut tally = Tally::default();
        for (i, case) in self.cases.iter_mut().enumerate() {
            // Nothing after a locked case runs.
            if tally.locked > 0 || case.lock_state().is_locked() {
                debug!(test_name, suite_number, case_number = i + 1, "case is locked");
                tally.locked += 1;
                continue;
            }

            let (success, log) = run_case(test_name, suite_number, case.as_mut(), i + 1, out);
            if success {
                tally.passed += 1;
                if self.settings.verbose {
                    out.write_str(&log);
                }
            } else {
                tally.failed += 1;
                out.write_str(&log);
            }
        }
        Ok(tally)
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let cases = self
            .cases
            .iter()
            .map(|c| c.to_json())
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(serde_json::json!({
            "type": KIND,
            "scored": self.scored,
            "cases": cases,
        }))
    }
}
