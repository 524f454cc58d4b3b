//! Line-level Markdown recognition.
//!
//! Nothing here builds a tree: a line is judged on its own text, and a
//! document is just the ordered list of its lines.

pub mod classify;
pub mod document;
pub mod rules;

pub use classify::{LineClass, classify};
pub use document::{Document, LineRange};
pub use rules::Rule;
