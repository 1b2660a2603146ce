//! Note loader - reads the note index and renders each listed note

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::note::{sort_by_date_desc, Note, NoteMeta};
use super::{extract_title, MarkdownRenderer};
use crate::highlight::Highlighter;
use crate::Notes;

/// Errors while reading the note index
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Note index not found: {0:?}")]
    IndexNotFound(PathBuf),

    #[error("Invalid note index {path:?}: {source}")]
    InvalidIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The list of notes kept in `index.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteIndex {
    pub entries: Vec<NoteMeta>,
}

impl NoteIndex {
    /// Load the index from a JSON file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::IndexNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| LoadError::InvalidIndex {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the index as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n")?;
        tracing::debug!("Saved {} index entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    /// Whether an entry for `filename` exists
    pub fn contains(&self, filename: &str) -> bool {
        self.entries.iter().any(|e| e.filename == filename)
    }

    /// Add an entry
    pub fn push(&mut self, meta: NoteMeta) {
        self.entries.push(meta);
    }

    /// Add entries for markdown files in `notes_dir` that the index lacks
    ///
    /// Titles come from the document heading (or the file stem), dates from
    /// the file modification time. Existing entries are left untouched.
    /// Returns the number of entries added.
    pub fn scan(&mut self, notes_dir: &Path) -> Result<usize, LoadError> {
        let mut added = 0;

        for entry in WalkDir::new(notes_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let filename = relative_filename(notes_dir, path);
            if self.contains(&filename) {
                continue;
            }

            let content = fs::read_to_string(path)?;
            let title = extract_title(&content).unwrap_or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Untitled")
                    .to_string()
            });

            let modified = fs::metadata(path)?
                .modified()
                .ok()
                .map(chrono::DateTime::<Local>::from)
                .unwrap_or_else(Local::now);

            tracing::info!("Indexed new note: {}", filename);
            self.push(NoteMeta::new(
                filename,
                title,
                modified.format("%Y-%m-%d").to_string(),
            ));
            added += 1;
        }

        Ok(added)
    }
}

/// Loads and renders the notes listed in the index
pub struct NoteLoader<'a> {
    notes: &'a Notes,
    renderer: MarkdownRenderer,
    highlighter: Option<Highlighter>,
}

impl<'a> NoteLoader<'a> {
    /// Create a new note loader
    pub fn new(notes: &'a Notes) -> Self {
        let config = &notes.config;
        let renderer = MarkdownRenderer::with_summary_length(config.summary_length);
        let highlighter = config
            .highlight
            .enable
            .then(|| Highlighter::with_options(config.highlight.lang_label));

        Self {
            notes,
            renderer,
            highlighter,
        }
    }

    /// Load the note index
    pub fn load_index(&self) -> Result<NoteIndex, LoadError> {
        NoteIndex::load(&self.notes.index_path())
    }

    /// Load and render all indexed notes, newest first
    ///
    /// Notes whose file cannot be read are skipped with a warning.
    pub fn load_notes(&self) -> Result<Vec<Note>, LoadError> {
        let mut entries = self.load_index()?.entries;
        sort_by_date_desc(&mut entries);

        let mut notes = Vec::with_capacity(entries.len());

        for meta in entries {
            if !is_safe_filename(&meta.filename) {
                tracing::warn!("Skipping note outside the notes directory: {}", meta.filename);
                continue;
            }

            let path = self.notes.notes_dir.join(&meta.filename);
            match fs::read_to_string(&path) {
                Ok(markdown) => notes.push(self.render_note(meta, &markdown)),
                Err(e) => {
                    tracing::warn!("Failed to load note {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Rendered {} notes", notes.len());
        Ok(notes)
    }

    /// Render one note's markdown
    pub fn render_note(&self, meta: NoteMeta, markdown: &str) -> Note {
        let mut parsed = self.renderer.parse(markdown);

        if let Some(highlighter) = &self.highlighter {
            parsed.full_content = parsed
                .full_content
                .map(|html| highlighter.highlight_html(&html));
        }

        let category = self.notes.config.category_for(&meta.tags);

        Note {
            meta,
            parsed,
            category,
        }
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Index file names use forward slashes whatever the platform
fn relative_filename(notes_dir: &Path, path: &Path) -> String {
    path.strip_prefix(notes_dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && Path::new(filename)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
