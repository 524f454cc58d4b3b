use xi_rope::delta::Builder;
use xi_rope::{LinesMetric, Rope};

use crate::parsing::{Document, LineRange};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("{range} is outside a document of {line_count} lines")]
    OutOfBounds { range: LineRange, line_count: usize },
    #[error("replacement for {range} has {got} lines, expected {expected}")]
    LineCountMismatch {
        range: LineRange,
        expected: usize,
        got: usize,
    },
    #[error("editor rejected the edit: {0}")]
    Rejected(String),
}

/// The host's editing surface, reduced to what the indent commands need.
///
/// Implemented by whatever owns the text (an editor widget, a file buffer).
/// Replacements always keep the line count of what they replace.
pub trait Editor {
    fn lines(&self) -> Document;
    fn selection(&self) -> Option<LineRange>;
    fn cursor_line(&self) -> Option<usize>;
    fn replace_range(&mut self, range: LineRange, lines: &[String]) -> Result<(), EditorError>;
    fn replace_all(&mut self, lines: &[String]) -> Result<(), EditorError>;
}

/// An in-memory [`Editor`] over an xi-rope buffer.
///
/// Line edits compile to a single delta, so a replacement either lands
/// completely or not at all.
#[derive(Clone)]
pub struct TextBuffer {
    buffer: Rope,
    selection: Option<LineRange>,
    cursor: Option<usize>,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selection: None,
            cursor: None,
        }
    }

    pub fn with_selection(mut self, range: LineRange) -> Self {
        self.selection = Some(range);
        self
    }

    pub fn with_cursor(mut self, line: usize) -> Self {
        self.cursor = Some(line);
        self
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.measure::<LinesMetric>() + 1
    }

    /// Byte span of the lines in `range`, excluding the final newline.
    fn byte_span(&self, range: LineRange) -> Result<std::ops::Range<usize>, EditorError> {
        let line_count = self.line_count();
        if range.end >= line_count {
            return Err(EditorError::OutOfBounds { range, line_count });
        }
        let start = self.buffer.offset_of_line(range.start);
        let end = if range.end + 1 < line_count {
            self.buffer.offset_of_line(range.end + 1) - 1
        } else {
            self.buffer.len()
        };
        Ok(start..end)
    }

    fn splice(&mut self, span: std::ops::Range<usize>, text: &str) {
        let mut builder = Builder::new(self.buffer.len());
        builder.replace(span, Rope::from(text));
        self.buffer = builder.build().apply(&self.buffer);
    }
}

impl Editor for TextBuffer {
    fn lines(&self) -> Document {
        Document::from_text(&self.text())
    }

    fn selection(&self) -> Option<LineRange> {
        self.selection
    }

    fn cursor_line(&self) -> Option<usize> {
        self.cursor
    }

    fn replace_range(&mut self, range: LineRange, lines: &[String]) -> Result<(), EditorError> {
        if lines.len() != range.len() {
            return Err(EditorError::LineCountMismatch {
                range,
                expected: range.len(),
                got: lines.len(),
            });
        }
        let span = self.byte_span(range)?;
        self.splice(span, &lines.join("\n"));
        Ok(())
    }

    fn replace_all(&mut self, lines: &[String]) -> Result<(), EditorError> {
        let line_count = self.line_count();
        if lines.len() != line_count {
            return Err(EditorError::LineCountMismatch {
                range: LineRange::new(0, line_count - 1),
                expected: line_count,
                got: lines.len(),
            });
        }
        self.buffer = Rope::from(lines.join("\n"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn line_count_matches_newline_split() {
        assert_eq!(TextBuffer::new("").line_count(), 1);
        assert_eq!(TextBuffer::new("a\nb\n").line_count(), 3);
    }

    #[test]
    fn replace_middle_range() {
        let mut buf = TextBuffer::new("one\ntwo\nthree\nfour");
        buf.replace_range(LineRange::new(1, 2), &strings(&["TWO", "THREE"]))
            .unwrap();
        assert_eq!(buf.text(), "one\nTWO\nTHREE\nfour");
    }

    #[test]
    fn replace_last_line_without_trailing_newline() {
        let mut buf = TextBuffer::new("one\ntwo");
        buf.replace_range(LineRange::single(1), &strings(&["\u{3000}\u{3000}two"]))
            .unwrap();
        assert_eq!(buf.text(), "one\n\u{3000}\u{3000}two");
    }

    #[test]
    fn replace_keeps_trailing_newline() {
        let mut buf = TextBuffer::new("one\ntwo\n");
        buf.replace_range(LineRange::new(0, 1), &strings(&["1", "2"]))
            .unwrap();
        assert_eq!(buf.text(), "1\n2\n");
    }

    #[test]
    fn out_of_bounds_range_is_rejected_without_editing() {
        let mut buf = TextBuffer::new("one\ntwo");
        let err = buf
            .replace_range(LineRange::new(1, 2), &strings(&["x", "y"]))
            .unwrap_err();
        assert!(matches!(err, EditorError::OutOfBounds { line_count: 2, .. }));
        assert_eq!(buf.text(), "one\ntwo");
    }

    #[test]
    fn mismatched_line_count_is_rejected() {
        let mut buf = TextBuffer::new("one\ntwo");
        let err = buf.replace_all(&strings(&["only"])).unwrap_err();
        assert!(matches!(err, EditorError::LineCountMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn lines_round_trip_through_document() {
        let buf = TextBuffer::new("a\r\nb");
        assert_eq!(buf.lines().to_text(), "a\r\nb");
    }
}
