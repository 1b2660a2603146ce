//! Content module - note index, markdown parsing and rendering

pub mod loader;
mod markdown;
mod note;
pub mod syntax;

pub use loader::{LoadError, NoteIndex, NoteLoader};
pub use markdown::{
    extract_summary, extract_title, MarkdownRenderer, ParsedResult, DEFAULT_SUMMARY_LENGTH,
};
pub use note::{sort_by_date_desc, Note, NoteMeta};
