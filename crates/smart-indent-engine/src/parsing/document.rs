use std::fmt;

/// An inclusive range of 0-based line indices `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Number of lines covered. Never zero.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn contains(self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    /// The part of the range inside a document of `line_count` lines.
    ///
    /// `None` when the range starts past the last line.
    #[must_use]
    pub fn clamp_to(self, line_count: usize) -> Option<Self> {
        if self.start >= line_count {
            return None;
        }
        Some(Self {
            start: self.start,
            end: self.end.min(line_count - 1),
        })
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lines {}-{}", self.start + 1, self.end + 1)
    }
}

/// A document as an ordered list of lines.
///
/// Text is split on `\n` only; a trailing `\r` stays part of its line so that
/// [`Document::to_text`] reproduces the input byte for byte. There is always
/// at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Wraps already split lines. An empty vector becomes a single empty line.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self {
                lines: vec![String::new()],
            };
        }
        Self { lines }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn full_range(&self) -> LineRange {
        LineRange {
            start: 0,
            end: self.lines.len() - 1,
        }
    }

    /// Lines inside `range`, or `None` if it reaches past the end.
    pub fn slice(&self, range: LineRange) -> Option<&[String]> {
        self.lines.get(range.start..=range.end)
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
