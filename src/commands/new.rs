//! Create a new note

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{LoadError, NoteIndex, NoteMeta};
use crate::Notes;

/// Create `notes/<slug>.md` and register it in the index
pub fn run(notes: &Notes, title: &str, tags: &[String]) -> Result<PathBuf> {
    let mut slug = slug::slugify(title);
    if slug.is_empty() {
        slug = "untitled".to_string();
    }
    let filename = format!("{}.md", slug);
    let file_path = notes.notes_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let index_path = notes.index_path();
    let mut index = match NoteIndex::load(&index_path) {
        Ok(index) => index,
        Err(LoadError::IndexNotFound(_)) => NoteIndex::default(),
        Err(e) => return Err(e.into()),
    };

    fs::create_dir_all(&notes.notes_dir)?;
    fs::write(&file_path, format!("# {}\n\n", title))?;

    if !index.contains(&filename) {
        let mut meta = NoteMeta::new(
            filename,
            title,
            chrono::Local::now().format("%Y-%m-%d").to_string(),
        );
        meta.tags = tags.to_vec();
        index.push(meta);
        index.save(&index_path)?;
    }

    println!("Created: {:?}", file_path);

    Ok(file_path)
}
