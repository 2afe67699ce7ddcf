use tracing::debug;

use super::GradedTest;
use crate::case::{Interact, LockState};
use crate::format;
use crate::output::Output;

impl GradedTest {
    /// Walk every case and let locked ones run the interactive exchange.
    ///
    /// Every case is visited exactly once regardless of how its exchange
    /// ends; only a broken exchange (`Err`) stops the walk.
    pub fn unlock(&mut self, interact: &mut dyn Interact, out: &mut Output) -> anyhow::Result<()> {
        let unique_id_prefix = self.unique_id_prefix();
        let mut remaining = self.case_count();

        for (suite_num, suite) in self.suites.iter_mut().enumerate() {
            for (case_num, case) in suite.cases_mut().iter_mut().enumerate() {
                let case_id = format!(
                    "{} > Suite {} > Case {}",
                    self.name,
                    suite_num + 1,
                    case_num + 1
                );

                format::print_line(out, '-');
                out.line(&case_id);
                out.line(format!("(cases remaining: {})", remaining));
                out.blank();
                remaining -= 1;

                if !case.lock_state().is_locked() {
                    out.line("-- Already unlocked --");
                    out.blank();
                    continue;
                }

                let unlocked = case.unlock(&unique_id_prefix, &case_id, interact, out)?;
                debug!(case_id = %case_id, unlocked, "unlock exchange finished");
            }
        }

        assert_eq!(remaining, 0, "Number of cases is incorrect");
        format::print_line(out, '-');
        out.line(format!("OK! All cases for {} unlocked.", self.name));
        out.blank();
        Ok(())
    }

    /// Prepare the test for shipping: drop hidden cases, lock lockable ones,
    /// and drop suites left without cases.
    ///
    /// Positions in messages are 0-based and refer to the list as it was
    /// before this call.
    pub fn lock(&mut self, hash_fn: &dyn Fn(&str) -> String, out: &mut Output) {
        format::print_line(out, '-');
        out.line(&self.name);

        let snapshot = std::mem::take(&mut self.suites);
        for (suite_num, mut suite) in snapshot.into_iter().enumerate() {
            let cases = std::mem::take(suite.cases_mut());
            let mut kept = Vec::with_capacity(cases.len());

            for (case_num, mut case) in cases.into_iter().enumerate() {
                let message = format!("* Suite {} > Case {}: ", suite_num, case_num);
                if case.hidden() {
                    out.line(format!("{}removing hidden case", message));
                    debug!(suite = suite_num, case = case_num, "removing hidden case");
                    continue;
                }
                match case.lock_state() {
                    LockState::Lockable => {
                        case.lock(hash_fn);
                        out.line(format!("{}locking", message));
                    }
                    LockState::Unlocked => out.line(format!("{}leaving unlocked", message)),
                    LockState::Locked => out.line(format!("{}already unlocked", message)),
                }
                kept.push(case);
            }

            if kept.is_empty() {
                out.line(format!("* Suite {}: removing empty suite", suite_num));
                debug!(suite = suite_num, "removing empty suite");
                continue;
            }
            *suite.cases_mut() = kept;
            self.suites.push(suite);
        }
        out.blank();
    }
}
