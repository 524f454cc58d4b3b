use log::{Level, debug, error, info, log_enabled, warn};

use crate::config::IndentConfig;
use crate::parsing::{LineClass, LineRange, classify};

use super::detect::has_indent;
use super::editor::{Editor, EditorError};
use super::error::IndentError;
use super::paragraph::{is_paragraph_excluded, locate};
use super::patch::{Action, Applied, Target};
use super::transform::{add_indent, clean_existing_indent, remove_indent};

/// One user-issued indent command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    pub target: Target,
}

impl Command {
    pub fn new(action: Action, target: Target) -> Self {
        Self { action, target }
    }
}

/// Configuration plus the whole-document toggle state.
///
/// `is_indented` only tracks whole-document commands; selections and
/// paragraphs are inspected afresh on every toggle. It starts false and is
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: IndentConfig,
    is_indented: bool,
}

impl Session {
    pub fn new(config: IndentConfig) -> Self {
        Self {
            config,
            is_indented: false,
        }
    }

    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect from the next command.
    pub fn set_config(&mut self, config: IndentConfig) {
        self.config = config;
    }

    pub fn is_indented(&self) -> bool {
        self.is_indented
    }

    pub fn run_on<E: Editor + ?Sized>(
        &mut self,
        editor: &mut E,
        command: Command,
    ) -> Result<Applied, IndentError> {
        self.run(Some(editor), command)
    }

    /// Runs a command against the host editor, if there is one.
    ///
    /// Either the whole target is replaced with a single editor write or
    /// nothing is written at all.
    pub fn run<E: Editor + ?Sized>(
        &mut self,
        editor: Option<&mut E>,
        command: Command,
    ) -> Result<Applied, IndentError> {
        let result = match editor {
            None => Err(IndentError::NoTarget),
            Some(editor) => {
                // Snapshot so every line of this command sees the same rules.
                let cfg = self.config.clone();
                match command.target {
                    Target::Document => self.run_document(editor, command.action, &cfg),
                    Target::Selection => run_selection(editor, command.action, &cfg),
                    Target::Paragraph => run_paragraph(editor, command.action, &cfg),
                }
            }
        };

        match &result {
            Ok(applied) => info!(
                "{:?} indent on {} ({}): {} of {} lines changed",
                applied.action,
                applied.target,
                applied.range,
                applied.lines_changed,
                applied.lines_in_scope
            ),
            Err(e) if e.is_skip() => warn!("{:?} on {} skipped: {e}", command.action, command.target),
            Err(e) => error!("{:?} on {} failed: {e}", command.action, command.target),
        }
        result
    }

    fn run_document<E: Editor + ?Sized>(
        &mut self,
        editor: &mut E,
        action: Action,
        cfg: &IndentConfig,
    ) -> Result<Applied, IndentError> {
        let doc = editor.lines();
        log_classification(doc.lines(), doc.full_range(), cfg);
        let action = match action {
            Action::Toggle if self.is_indented => Action::Remove,
            Action::Toggle => Action::Add,
            other => other,
        };

        let new_lines = match action {
            Action::Remove => remove_indent(doc.lines(), cfg),
            _ => add_indent(&clean_existing_indent(doc.lines(), cfg), cfg),
        };
        editor.replace_all(&new_lines).map_err(transform_failure)?;
        self.is_indented = action == Action::Add;

        Ok(Applied {
            action,
            target: Target::Document,
            range: doc.full_range(),
            lines_in_scope: doc.line_count(),
            lines_changed: count_changed(doc.lines(), &new_lines),
        })
    }
}

fn run_selection<E: Editor + ?Sized>(
    editor: &mut E,
    action: Action,
    cfg: &IndentConfig,
) -> Result<Applied, IndentError> {
    let selection = editor.selection().ok_or(IndentError::EmptySelection)?;
    let doc = editor.lines();
    let range = selection
        .clamp_to(doc.line_count())
        .ok_or(IndentError::EmptySelection)?;
    let block = doc
        .slice(range)
        .ok_or_else(|| IndentError::TransformFailure(format!("{range} is out of bounds")))?;

    if block.iter().all(|line| classify(line, cfg).is_blank()) {
        return Err(IndentError::EmptySelection);
    }

    apply_block(editor, block, range, action, Target::Selection, cfg)
}

fn run_paragraph<E: Editor + ?Sized>(
    editor: &mut E,
    action: Action,
    cfg: &IndentConfig,
) -> Result<Applied, IndentError> {
    let cursor = editor.cursor_line().ok_or(IndentError::NoTarget)?;
    let doc = editor.lines();
    let cursor = cursor.min(doc.line_count() - 1);

    if doc.line(cursor).is_none_or(|line| classify(line, cfg).is_blank()) {
        return Err(IndentError::NoTarget);
    }

    let range = locate(&doc, cursor, cfg);
    debug!("cursor line {} resolved to paragraph {range}", cursor + 1);
    let block = doc
        .slice(range)
        .ok_or_else(|| IndentError::TransformFailure(format!("{range} is out of bounds")))?;

    if is_paragraph_excluded(block, cfg) {
        return Err(IndentError::ExcludedParagraph { range });
    }

    apply_block(editor, block, range, action, Target::Paragraph, cfg)
}

/// Transforms a selection or paragraph and writes it back in one edit.
fn apply_block<E: Editor + ?Sized>(
    editor: &mut E,
    block: &[String],
    range: LineRange,
    action: Action,
    target: Target,
    cfg: &IndentConfig,
) -> Result<Applied, IndentError> {
    log_classification(block, range, cfg);
    let action = match action {
        Action::Toggle if block.first().is_some_and(|l| has_indent(l, cfg)) => Action::Remove,
        Action::Toggle => Action::Add,
        other => other,
    };

    let new_lines = match action {
        Action::Remove => remove_indent(block, cfg),
        _ => add_indent(block, cfg),
    };
    editor
        .replace_range(range, &new_lines)
        .map_err(transform_failure)?;

    Ok(Applied {
        action,
        target,
        range,
        lines_in_scope: block.len(),
        lines_changed: count_changed(block, &new_lines),
    })
}

fn log_classification(lines: &[String], range: LineRange, cfg: &IndentConfig) {
    if !log_enabled!(Level::Debug) {
        return;
    }
    let (mut plain, mut structural, mut blank) = (0, 0, 0);
    for line in lines {
        match classify(line, cfg) {
            LineClass::Plain => plain += 1,
            LineClass::Structural(_) => structural += 1,
            LineClass::Blank => blank += 1,
        }
    }
    debug!("{range}: {plain} plain, {structural} structural, {blank} blank");
}

fn count_changed(before: &[String], after: &[String]) -> usize {
    before.iter().zip(after).filter(|(a, b)| a != b).count()
}

fn transform_failure(err: EditorError) -> IndentError {
    IndentError::TransformFailure(err.to_string())
}
