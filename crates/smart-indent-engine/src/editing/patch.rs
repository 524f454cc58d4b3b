use std::fmt;

use crate::parsing::LineRange;

/// What an indent command does to the lines it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    /// Add or remove, decided from the current state of the target.
    Toggle,
}

/// Which lines an indent command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Document,
    Selection,
    /// The paragraph around the cursor.
    Paragraph,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Document => "document",
            Target::Selection => "selection",
            Target::Paragraph => "paragraph",
        })
    }
}

/// Result of a command that reached the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// `Add` or `Remove`; a toggle reports the branch it took.
    pub action: Action,
    pub target: Target,
    /// Lines that were replaced.
    pub range: LineRange,
    /// Lines in the target, the count shown to the user.
    pub lines_in_scope: usize,
    /// Lines whose text actually changed.
    pub lines_changed: usize,
}

impl Applied {
    /// Short user-facing confirmation.
    pub fn message(&self) -> String {
        let verb = match self.action {
            Action::Add | Action::Toggle => "added to",
            Action::Remove => "removed from",
        };
        match self.target {
            Target::Document => format!("First-line indent {verb} document"),
            target => format!(
                "First-line indent {verb} {target} ({} lines)",
                self.lines_in_scope
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_message_has_no_line_count() {
        let applied = Applied {
            action: Action::Add,
            target: Target::Document,
            range: LineRange::new(0, 9),
            lines_in_scope: 10,
            lines_changed: 4,
        };
        assert_eq!(applied.message(), "First-line indent added to document");
    }

    #[test]
    fn selection_message_reports_lines_in_scope() {
        let applied = Applied {
            action: Action::Remove,
            target: Target::Selection,
            range: LineRange::new(2, 4),
            lines_in_scope: 3,
            lines_changed: 1,
        };
        assert_eq!(
            applied.message(),
            "First-line indent removed from selection (3 lines)"
        );
    }
}
