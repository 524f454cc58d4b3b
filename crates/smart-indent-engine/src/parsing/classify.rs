use std::fmt;

use crate::config::{IndentConfig, is_indent_whitespace};

use super::rules::Rule;

/// Classification of a single line, derived from its text and the configuration.
///
/// Never cached: a line is reclassified every time an operation looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    /// Empty or whitespace only.
    Blank,
    /// Matched an active exclusion rule.
    Structural(Rule),
    /// Ordinary prose, eligible for indentation.
    Plain,
}

impl LineClass {
    pub fn is_plain(self) -> bool {
        matches!(self, LineClass::Plain)
    }

    pub fn is_blank(self) -> bool {
        matches!(self, LineClass::Blank)
    }

    pub fn is_structural(self) -> bool {
        matches!(self, LineClass::Structural(_))
    }
}

impl fmt::Display for LineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineClass::Blank => f.write_str("blank"),
            LineClass::Structural(rule) => write!(f, "structural ({rule})"),
            LineClass::Plain => f.write_str("plain"),
        }
    }
}

/// Classifies one line.
///
/// Blank wins over everything; otherwise the first active rule in
/// [`Rule::ALL`] order that matches makes the line structural.
pub fn classify(line: &str, cfg: &IndentConfig) -> LineClass {
    if line.chars().all(is_indent_whitespace) {
        return LineClass::Blank;
    }
    Rule::ALL
        .into_iter()
        .find(|rule| rule.is_active(cfg) && rule.matches(line))
        .map_or(LineClass::Plain, LineClass::Structural)
}
