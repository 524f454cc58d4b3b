/*!
 * # Editing
 *
 * The indent commands and the pieces they are built from.
 *
 * ## Flow of a command
 *
 * 1. The host hands a [`Session`] an [`Editor`] and a [`Command`].
 * 2. The session snapshots its [`IndentConfig`](crate::config::IndentConfig)
 *    and resolves the target lines: the whole document, the selection, or the
 *    paragraph around the cursor ([`paragraph::locate`]).
 * 3. A toggle is resolved to add or remove, from the session state for the
 *    whole document or from [`detect::has_indent`] on the first line otherwise.
 * 4. [`transform`] rewrites the plain lines and the result goes back to the
 *    editor in a single write.
 *
 * Skips and failures come back as [`IndentError`]; the document is never
 * left half edited.
 *
 * ```rust
 * use smart_indent_engine::editing::*;
 * use smart_indent_engine::config::IndentConfig;
 *
 * let mut buffer = TextBuffer::new("# Title\n\nSome prose.");
 * let mut session = Session::new(IndentConfig::default());
 *
 * let applied = session
 *     .run_on(&mut buffer, Command::new(Action::Add, Target::Document))
 *     .unwrap();
 *
 * assert_eq!(applied.lines_changed, 1);
 * assert_eq!(buffer.text(), "# Title\n\n\u{3000}\u{3000}Some prose.");
 * ```
 */

pub mod detect;
pub mod editor;
pub mod error;
pub mod paragraph;
pub mod patch;
pub mod session;
pub mod transform;

pub use detect::has_indent;
pub use editor::{Editor, EditorError, TextBuffer};
pub use error::IndentError;
pub use paragraph::{is_paragraph_excluded, locate};
pub use patch::{Action, Applied, Target};
pub use session::{Command, Session};
pub use transform::{add_indent, clean_existing_indent, remove_indent};
