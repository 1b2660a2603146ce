//! Initialize a new notes site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{NoteIndex, NoteMeta};
use crate::{Notes, CONFIG_FILE};

const CONFIG_TEMPLATE: &str = r#"# Notes Configuration

# Site
title: My Notes
subtitle: ''
description: ''
author: John Doe
language: en

# URL
root: /

# Directory
notes_dir: notes
index_file: index.json
public_dir: public

# Cards
summary_length: 250
date_format: MMMM DD, YYYY
categories:
  - python
  - git

highlight:
  enable: true
  lang_label: true
"#;

const SAMPLE_NOTE: &str = r#"# Hello Notes

Welcome to your notes site. Every markdown file listed in `notes/index.json`
becomes a card on the front page.

Click a card to expand the **full note**. Code blocks are highlighted:

```python
def greet(name):
    return f"Hello, {name}!"  # friendly
```

## Next steps

- Create a note with `notes-rs new "My Note"`
- Pick up hand-written files with `notes-rs index`
- Rebuild on every save with `notes-rs generate --watch`
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let notes_dir = target_dir.join("notes");
    fs::create_dir_all(&notes_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::warn!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let index_path = notes_dir.join("index.json");
    if index_path.exists() {
        tracing::warn!("Keeping existing {:?}", index_path);
        return Ok(());
    }

    fs::write(notes_dir.join("hello-notes.md"), SAMPLE_NOTE)?;

    let mut meta = NoteMeta::new(
        "hello-notes.md",
        "Hello Notes",
        chrono::Local::now().format("%Y-%m-%d").to_string(),
    );
    meta.tags = vec!["notes".to_string(), "python".to_string()];

    let mut index = NoteIndex::default();
    index.push(meta);
    index.save(&index_path)?;

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(notes: &Notes) -> Result<()> {
    init_site(&notes.base_dir)
}
