use crate::parsing::LineRange;

/// Why an indent command left the document alone.
///
/// Every variant means nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndentError {
    #[error("no editable Markdown document is available")]
    NoTarget,
    #[error("select the text to indent first")]
    EmptySelection,
    #[error("paragraph at {range} contains Markdown structure and was skipped")]
    ExcludedParagraph { range: LineRange },
    #[error("failed to apply indentation: {0}")]
    TransformFailure(String),
}

impl IndentError {
    /// Skips are expected outcomes; only transform failures are faults.
    pub fn is_skip(&self) -> bool {
        !matches!(self, IndentError::TransformFailure(_))
    }
}
