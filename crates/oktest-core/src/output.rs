//! Output handle with suspendable emission and capture logs.
//!
//! Everything a grading run prints goes through an [`Output`]. Text is
//! appended to every open log and, unless emission is suspended, forwarded
//! to the sink. Logs are identified by a [`LogId`] and must be removed once
//! read so they do not accumulate across cases.

use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogId(u64);

#[derive(Debug)]
enum Sink {
    Stdout,
    Memory(String),
}

#[derive(Debug)]
pub struct Output {
    sink: Sink,
    suspended: bool,
    logs: BTreeMap<LogId, String>,
    next_id: u64,
}

impl Output {
    /// Emit to the process stdout.
    pub fn stdout() -> Self {
        Self::with_sink(Sink::Stdout)
    }

    /// Emit to an in-memory transcript, readable via [`Output::transcript`].
    pub fn memory() -> Self {
        Self::with_sink(Sink::Memory(String::new()))
    }

    fn with_sink(sink: Sink) -> Self {
        Self {
            sink,
            suspended: false,
            logs: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn write_str(&mut self, text: &str) {
        for log in self.logs.values_mut() {
            log.push_str(text);
        }
        if self.suspended {
            return;
        }
        match &mut self.sink {
            Sink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                // A closed stdout is not a grading failure.
                let _ = stdout.write_all(text.as_bytes());
                let _ = stdout.flush();
            }
            Sink::Memory(buf) => buf.push_str(text),
        }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        self.write_str(text.as_ref());
        self.write_str("\n");
    }

    pub fn blank(&mut self) {
        self.write_str("\n");
    }

    /// Stop forwarding text to the sink. Returns the previous state so that
    /// callers can hand it back to [`Output::resume`].
    pub fn suspend(&mut self) -> bool {
        std::mem::replace(&mut self.suspended, true)
    }

    /// Restore emission to the state captured by [`Output::suspend`].
    pub fn resume(&mut self, was_suspended: bool) {
        self.suspended = was_suspended;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn new_log(&mut self) -> LogId {
        let id = LogId(self.next_id);
        self.next_id += 1;
        self.logs.insert(id, String::new());
        id
    }

    pub fn log(&self, id: LogId) -> Option<&str> {
        self.logs.get(&id).map(String::as_str)
    }

    /// Detach a log and return its contents.
    pub fn remove_log(&mut self, id: LogId) -> Option<String> {
        self.logs.remove(&id)
    }

    pub fn open_logs(&self) -> usize {
        self.logs.len()
    }

    /// Emitted text for a memory sink; empty for stdout.
    pub fn transcript(&self) -> &str {
        match &self.sink {
            Sink::Stdout => "",
            Sink::Memory(buf) => buf,
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspended_text_is_logged_but_not_emitted() {
        let mut out = Output::memory();
        out.line("before");
        let prev = out.suspend();
        let id = out.new_log();
        out.line("hidden");
        out.resume(prev);
        out.line("after");

        assert_eq!(out.transcript(), "before\nafter\n");
        assert_eq!(out.remove_log(id).as_deref(), Some("hidden\nafter\n"));
        assert_eq!(out.open_logs(), 0);
    }

    #[test]
    fn resume_restores_outer_suspension() {
        let mut out = Output::memory();
        let outer = out.suspend();
        let inner = out.suspend();
        out.resume(inner);
        assert!(out.is_suspended());
        out.resume(outer);
        assert!(!out.is_suspended());
    }

    #[test]
    fn log_ids_are_not_reused() {
        let mut out = Output::memory();
        let a = out.new_log();
        out.remove_log(a);
        let b = out.new_log();
        assert_ne!(a, b);
        assert!(out.log(a).is_none());
        assert_eq!(out.log(b), Some(""));
    }
}
