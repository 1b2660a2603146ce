//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Notes;

/// Remove the generated site
pub fn run(notes: &Notes) -> Result<()> {
    if notes.public_dir.exists() {
        fs::remove_dir_all(&notes.public_dir)?;
        tracing::info!("Deleted: {:?}", notes.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = TempDir::new().unwrap();
        let notes = Notes::new(dir.path()).unwrap();
        fs::create_dir_all(notes.public_dir.join("css")).unwrap();

        run(&notes).unwrap();
        assert!(!notes.public_dir.exists());

        // Nothing to clean is fine
        run(&notes).unwrap();
    }
}
