//! List indexed notes

use anyhow::Result;

use crate::content::{sort_by_date_desc, NoteIndex};
use crate::Notes;

/// Print the indexed notes, newest first
pub fn run(notes: &Notes) -> Result<()> {
    let mut entries = NoteIndex::load(&notes.index_path())?.entries;
    sort_by_date_desc(&mut entries);

    println!("Notes ({}):", entries.len());
    for meta in &entries {
        let tags = if meta.tags.is_empty() {
            String::new()
        } else {
            format!(" #{}", meta.tags.join(" #"))
        };
        println!("  {} - {} [{}]{}", meta.date, meta.title, meta.filename, tags);
    }

    Ok(())
}
