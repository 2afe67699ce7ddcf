//! The case contract consumed by suites and tests.

use crate::output::Output;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

/// Lock state of a case.
///
/// Serialized as the `locked` field: `true`, `false`, or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// Answer is hashed; the case must be unlocked before it can run.
    Locked,
    /// Explicitly never locked, or already unlocked by a student.
    Unlocked,
    /// Not locked yet; the next `lock` pass will lock it.
    #[default]
    Lockable,
}

impl LockState {
    pub fn is_lockable(&self) -> bool {
        matches!(self, Self::Lockable)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Locked => Some(true),
            Self::Unlocked => Some(false),
            Self::Lockable => None,
        }
    }
}

impl From<Option<bool>> for LockState {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Locked,
            Some(false) => Self::Unlocked,
            None => Self::Lockable,
        }
    }
}

impl Serialize for LockState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_flag().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LockState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Self::from)
    }
}

/// What a case hands to the interactive exchange when it is unlocked.
#[derive(Debug, Clone, Copy)]
pub struct UnlockRequest<'a> {
    /// `unique_id_prefix + "\n" + case_id`.
    pub unique_id: &'a str,
    pub case_id: &'a str,
    pub question: &'a str,
    pub locked_answers: &'a [String],
    pub choices: Option<&'a [String]>,
}

/// The interactive exchange.
///
/// Returns the verified plain answers, `None` if the student gave up, or an
/// error if the exchange itself broke (e.g. the terminal went away).
pub trait Interact {
    fn interact(
        &mut self,
        request: &UnlockRequest<'_>,
        out: &mut Output,
    ) -> anyhow::Result<Option<Vec<String>>>;
}

impl<F> Interact for F
where
    F: FnMut(&UnlockRequest<'_>, &mut Output) -> anyhow::Result<Option<Vec<String>>>,
{
    fn interact(
        &mut self,
        request: &UnlockRequest<'_>,
        out: &mut Output,
    ) -> anyhow::Result<Option<Vec<String>>> {
        self(request, out)
    }
}

pub trait Case: Debug {
    /// Run the check. Explanations go to `out`; only the verdict matters to callers.
    fn run(&mut self, out: &mut Output) -> bool;

    /// Replace the answer with its hash and mark the case locked.
    /// Only called while the case is [`LockState::Lockable`].
    fn lock(&mut self, hash_fn: &dyn Fn(&str) -> String);

    /// Drive the interactive exchange. Returns whether the case ended up unlocked.
    fn unlock(
        &mut self,
        unique_id_prefix: &str,
        case_id: &str,
        interact: &mut dyn Interact,
        out: &mut Output,
    ) -> anyhow::Result<bool>;

    fn lock_state(&self) -> LockState;

    /// Hidden cases are dropped from shipped (locked) tests.
    fn hidden(&self) -> bool;

    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

/// Identity string fed to the interactive exchange.
pub fn unique_case_id(unique_id_prefix: &str, case_id: &str) -> String {
    format!("{}\n{}", unique_id_prefix, case_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, skip_serializing_if = "LockState::is_lockable")]
        locked: LockState,
    }

    #[test]
    fn lock_state_round_trips_as_tri_state_flag() {
        let cases = [
            ("{\"locked\":true}", LockState::Locked),
            ("{\"locked\":false}", LockState::Unlocked),
            ("{}", LockState::Lockable),
            ("{\"locked\":null}", LockState::Lockable),
        ];
        for (raw, expected) in cases {
            let probe: Probe = serde_json::from_str(raw).unwrap();
            assert_eq!(probe.locked, expected, "{}", raw);
        }
        let unset = serde_json::to_string(&Probe {
            locked: LockState::Lockable,
        })
        .unwrap();
        assert_eq!(unset, "{}");
    }

    #[test]
    fn unique_id_joins_with_newline() {
        assert_eq!(
            unique_case_id("lab00\nq1", "q1 > Suite 1 > Case 2"),
            "lab00\nq1\nq1 > Suite 1 > Case 2"
        );
    }

    #[test]
    fn closures_are_interactions() {
        let mut calls = 0;
        let mut interact =
            |req: &UnlockRequest<'_>, _: &mut Output| -> anyhow::Result<Option<Vec<String>>> {
                calls += 1;
                Ok(Some(vec![req.question.to_string()]))
            };
        let mut out = Output::memory();
        let req = UnlockRequest {
            unique_id: "a\nb\nc",
            case_id: "c",
            question: "q?",
            locked_answers: &[],
            choices: None,
        };
        let got = Interact::interact(&mut interact, &req, &mut out).unwrap();
        assert_eq!(got, Some(vec!["q?".to_string()]));
        assert_eq!(calls, 1);
    }
}
