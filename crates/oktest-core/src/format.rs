use crate::output::Output;

/// Width of separator lines.
pub const LINE_WIDTH: usize = 70;

/// Width of the `[ooook.....]` bar, in cells.
const BAR_CELLS: usize = 10;

pub fn print_line(out: &mut Output, ch: char) {
    out.line(ch.to_string().repeat(LINE_WIDTH));
}

/// Format the progress bar line. Deterministic, unit-testable.
#[must_use]
pub fn format_progress_bar(passed: usize, failed: usize, locked: usize) -> String {
    let total = passed + failed + locked;
    let percent = if total == 0 {
        0.0
    } else {
        (1000.0 * passed as f64 / total as f64).round() / 10.0
    };
    let filled = ((percent / 10.0).floor() as usize).min(BAR_CELLS);
    let bar = if filled == 0 {
        ".".repeat(BAR_CELLS)
    } else {
        format!("{}k{}", "o".repeat(filled - 1), ".".repeat(BAR_CELLS - filled))
    };
    format!("[{}] {:.1}% passed", bar, percent)
}

pub fn print_progress_bar(
    out: &mut Output,
    header: &str,
    passed: usize,
    failed: usize,
    locked: usize,
) {
    print_line(out, '-');
    out.line(header);
    out.line(format!("    Passed: {}", passed));
    out.line(format!("    Failed: {}", failed));
    if locked > 0 {
        out.line(format!("    Locked: {}", locked));
    }
    out.line(format_progress_bar(passed, failed, locked));
}

/// Pretty JSON with 4-space indentation, the layout of backing files.
pub fn pretty_json(value: &serde_json::Value) -> serde_json::Result<String> {
    use serde::Serialize;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_for_partial_pass() {
        assert_eq!(format_progress_bar(2, 3, 0), "[oook......] 40.0% passed");
    }

    #[test]
    fn bar_for_full_and_empty() {
        assert_eq!(format_progress_bar(4, 0, 0), "[oooooooook] 100.0% passed");
        assert_eq!(format_progress_bar(0, 0, 0), "[..........] 0.0% passed");
        assert_eq!(format_progress_bar(0, 2, 1), "[..........] 0.0% passed");
    }

    #[test]
    fn progress_bar_hides_zero_locked() {
        let mut out = Output::memory();
        print_progress_bar(&mut out, "q1", 1, 1, 0);
        let text = out.transcript();
        assert!(text.contains("q1\n    Passed: 1\n    Failed: 1\n[ooook.....] 50.0% passed\n"));
        assert!(!text.contains("Locked"));
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let v = serde_json::json!({"name": "q1"});
        assert_eq!(pretty_json(&v).unwrap(), "{\n    \"name\": \"q1\"\n}");
    }
}
