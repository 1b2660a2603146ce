//! Add unindexed markdown files to the note index

use anyhow::Result;

use crate::content::{LoadError, NoteIndex};
use crate::Notes;

/// Scan the notes directory and save the updated index
///
/// Returns the number of notes added.
pub fn run(notes: &Notes) -> Result<usize> {
    let index_path = notes.index_path();
    let mut index = match NoteIndex::load(&index_path) {
        Ok(index) => index,
        Err(LoadError::IndexNotFound(_)) => {
            tracing::info!("No index at {:?}, starting a new one", index_path);
            NoteIndex::default()
        }
        Err(e) => return Err(e.into()),
    };

    if !notes.notes_dir.exists() {
        anyhow::bail!("Notes directory not found: {:?}", notes.notes_dir);
    }

    let added = index.scan(&notes.notes_dir)?;
    if added > 0 {
        index.save(&index_path)?;
    }

    tracing::info!("Indexed {} new notes ({} total)", added, index.entries.len());
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_index_adds_new_files() {
        let dir = TempDir::new().unwrap();
        let notes = Notes::new(dir.path()).unwrap();
        fs::create_dir_all(&notes.notes_dir).unwrap();
        fs::write(notes.notes_dir.join("a.md"), "# Alpha\n\ntext").unwrap();
        fs::write(notes.notes_dir.join("b.md"), "no heading").unwrap();

        assert_eq!(run(&notes).unwrap(), 2);
        let index = NoteIndex::load(&notes.index_path()).unwrap();
        let titles: Vec<_> = index.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "b"]);

        // Second run finds nothing new
        assert_eq!(run(&notes).unwrap(), 0);
    }

    #[test]
    fn test_index_without_notes_dir_fails() {
        let dir = TempDir::new().unwrap();
        let notes = Notes::new(dir.path()).unwrap();
        assert!(run(&notes).is_err());
    }
}
