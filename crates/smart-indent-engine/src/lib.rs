pub mod config;
pub mod editing;
pub mod io;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use config::{IndentConfig, IndentMarker, MarkerError, MarkerPreset};
pub use editing::{
    Action, Applied, Command, Editor, EditorError, IndentError, Session, Target, TextBuffer,
};
pub use parsing::{Document, LineClass, LineRange, Rule, classify};
