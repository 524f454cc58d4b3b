use crate::config::IndentConfig;
use crate::parsing::{Document, LineClass, LineRange, classify};

/// Finds the paragraph around `cursor_line`.
///
/// Grows the range up and down while the neighbouring line is neither blank
/// nor structural. The cursor line itself is always included whatever its own
/// class, and a cursor past the end is clamped to the last line.
pub fn locate(doc: &Document, cursor_line: usize, cfg: &IndentConfig) -> LineRange {
    let lines = doc.lines();
    let cursor = cursor_line.min(doc.line_count() - 1);
    let joins = |line: &str| classify(line, cfg).is_plain();

    let mut start = cursor;
    while start > 0 && joins(&lines[start - 1]) {
        start -= 1;
    }

    let mut end = cursor;
    while end + 1 < lines.len() && joins(&lines[end + 1]) {
        end += 1;
    }

    LineRange { start, end }
}

/// True if any line in the block is structural.
pub fn is_paragraph_excluded<S: AsRef<str>>(lines: &[S], cfg: &IndentConfig) -> bool {
    lines
        .iter()
        .any(|line| matches!(classify(line.as_ref(), cfg), LineClass::Structural(_)))
}
