use std::fmt;

use serde::{Deserialize, Serialize};

/// Characters treated as indentation when stripping or detecting leading runs.
///
/// Unicode whitespace (which includes the full-width U+3000) plus the zero-width
/// characters editors leave behind at the start of previously indented lines.
pub fn is_indent_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{200C}' | '\u{FEFF}')
}

/// Strips the whole leading run of indent whitespace.
pub fn strip_leading_indent(line: &str) -> &str {
    line.trim_start_matches(is_indent_whitespace)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("indent marker must not be empty")]
    Empty,
    #[error("indent marker must not contain line breaks")]
    LineBreak,
    #[error("indent marker may only contain whitespace, found {0:?}")]
    NotWhitespace(char),
}

/// The marker choices offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPreset {
    /// Two full-width spaces, the usual CJK first-line indent.
    FullWidth,
    FourSpaces,
    TwoSpaces,
    Tab,
}

impl MarkerPreset {
    pub const ALL: [MarkerPreset; 4] = [
        MarkerPreset::FullWidth,
        MarkerPreset::FourSpaces,
        MarkerPreset::TwoSpaces,
        MarkerPreset::Tab,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MarkerPreset::FullWidth => "full-width",
            MarkerPreset::FourSpaces => "four-spaces",
            MarkerPreset::TwoSpaces => "two-spaces",
            MarkerPreset::Tab => "tab",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MarkerPreset::FullWidth => "\u{3000}\u{3000}",
            MarkerPreset::FourSpaces => "    ",
            MarkerPreset::TwoSpaces => "  ",
            MarkerPreset::Tab => "\t",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// The string prepended to plain lines.
///
/// Always non-empty and made only of whitespace, so prefixing a line never
/// changes how the rest of it classifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndentMarker(String);

impl IndentMarker {
    /// Accepts a preset key (`full-width`, `tab`, ...) or a literal whitespace string.
    pub fn parse(s: &str) -> Result<Self, MarkerError> {
        match MarkerPreset::from_key(s) {
            Some(preset) => Ok(preset.into()),
            None => Self::literal(s),
        }
    }

    pub fn literal(s: &str) -> Result<Self, MarkerError> {
        if s.is_empty() {
            return Err(MarkerError::Empty);
        }
        if s.contains(['\n', '\r']) {
            return Err(MarkerError::LineBreak);
        }
        if let Some(c) = s.chars().find(|c| !c.is_whitespace()) {
            return Err(MarkerError::NotWhitespace(c));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn preset(&self) -> Option<MarkerPreset> {
        MarkerPreset::ALL.into_iter().find(|p| p.text() == self.0)
    }
}

impl Default for IndentMarker {
    fn default() -> Self {
        MarkerPreset::FullWidth.into()
    }
}

impl From<MarkerPreset> for IndentMarker {
    fn from(preset: MarkerPreset) -> Self {
        Self(preset.text().to_string())
    }
}

impl TryFrom<String> for IndentMarker {
    type Error = MarkerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<IndentMarker> for String {
    fn from(marker: IndentMarker) -> Self {
        match marker.preset() {
            Some(preset) => preset.key().to_string(),
            None => marker.0,
        }
    }
}

impl fmt::Display for IndentMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.preset() {
            Some(preset) => f.write_str(preset.key()),
            None => write!(f, "{:?}", self.0),
        }
    }
}

/// Which Markdown constructs the indent transforms leave alone, and the marker they insert.
///
/// Read once at the start of every operation; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentConfig {
    pub ignore_headers: bool,
    pub ignore_lists: bool,
    pub ignore_tables: bool,
    pub ignore_code: bool,
    pub ignore_quotes: bool,
    pub preserve_list_indent: bool,
    pub indent_marker: IndentMarker,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            ignore_headers: true,
            ignore_lists: true,
            ignore_tables: true,
            ignore_code: true,
            ignore_quotes: true,
            preserve_list_indent: true,
            indent_marker: IndentMarker::default(),
        }
    }
}

impl IndentConfig {
    pub fn with_marker(mut self, marker: IndentMarker) -> Self {
        self.indent_marker = marker;
        self
    }

    /// Every optional rule switched off; only the always-on exclusions apply.
    pub fn permissive() -> Self {
        Self {
            ignore_headers: false,
            ignore_lists: false,
            ignore_tables: false,
            ignore_code: false,
            ignore_quotes: false,
            preserve_list_indent: false,
            indent_marker: IndentMarker::default(),
        }
    }
}
