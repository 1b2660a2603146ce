//! Note index entries and rendered notes

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ParsedResult;
use crate::helpers::parse_date;

/// One entry of `notes/index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMeta {
    /// Markdown file name, relative to the notes directory
    pub filename: String,

    /// Fallback title when the document has no `# ` heading
    #[serde(default)]
    pub title: String,

    /// Date as written in the index (e.g. `2024-01-15`)
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl NoteMeta {
    /// Create an index entry with no tags
    pub fn new(filename: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
            date: date.into(),
            tags: Vec::new(),
        }
    }

    /// Parsed date, `None` when the index holds something unreadable
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date(&self.date)
    }
}

/// A note loaded from disk and rendered
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    #[serde(flatten)]
    pub meta: NoteMeta,

    /// Title, summary and full HTML of the document
    pub parsed: ParsedResult,

    /// Card style derived from the tags
    pub category: String,
}

impl Note {
    /// Title shown on the card: the document heading, then the index title,
    /// then the file name
    pub fn display_title(&self) -> &str {
        match self.parsed.title.as_deref() {
            Some(title) => title,
            None if !self.meta.title.is_empty() => &self.meta.title,
            None => &self.meta.filename,
        }
    }
}

/// Sort notes newest first; undated entries go last
pub fn sort_by_date_desc(entries: &mut [NoteMeta]) {
    entries.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
}
