//! End-to-end site generation

use std::fs;

use notes_rs::content::{NoteIndex, NoteMeta};
use notes_rs::Notes;
use tempfile::TempDir;

fn meta(filename: &str, title: &str, date: &str, tags: &[&str]) -> NoteMeta {
    let mut meta = NoteMeta::new(filename, title, date);
    meta.tags = tags.iter().map(|t| t.to_string()).collect();
    meta
}

fn setup_site() -> (TempDir, Notes) {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("_config.yml"),
        "title: Test Notes\nroot: /site/\ndate_format: YYYY-MM-DD\n",
    )
    .unwrap();

    let notes = Notes::new(dir.path()).unwrap();
    fs::create_dir_all(&notes.notes_dir).unwrap();

    fs::write(
        notes.notes_dir.join("python.md"),
        "# Python Tips\n\nUse list comprehensions.\n\n```python\nxs = [x * 2 for x in range(3)]\n```\n",
    )
    .unwrap();
    fs::write(
        notes.notes_dir.join("git.md"),
        "# Git Basics\n\n1. init\n2. commit\n",
    )
    .unwrap();

    let mut index = NoteIndex::default();
    index.push(meta("git.md", "Git", "2023-05-01", &["Git"]));
    index.push(meta("python.md", "Python", "2024-02-10", &["python", "tips"]));
    index.push(meta("missing.md", "Missing", "2024-03-01", &[]));
    index.push(meta("../outside.md", "Outside", "2024-03-02", &[]));
    index.save(&notes.index_path()).unwrap();

    (dir, notes)
}

#[test]
fn test_generate_site() {
    let (_dir, notes) = setup_site();
    notes.generate().unwrap();

    let page = fs::read_to_string(notes.public_dir.join("index.html")).unwrap();
    assert!(page.contains("<title>Test Notes</title>"));
    assert!(page.contains(r#"<link rel="stylesheet" href="/site/css/style.css">"#));

    // Newest first, unreadable and unsafe entries skipped
    let python = page.find("<h3>Python Tips</h3>").unwrap();
    let git = page.find("<h3>Git Basics</h3>").unwrap();
    assert!(python < git);
    assert_eq!(page.matches(r#"class="note-card "#).count(), 2);
    assert!(!page.contains("Missing"));
    assert!(!page.contains("Outside"));

    assert!(page.contains(r#"<div class="note-card python" data-filename="python.md">"#));
    assert!(page.contains(r#"<div class="note-card git" data-filename="git.md">"#));
    assert!(page.contains(r#"<p class="date">2024-02-10</p>"#));
    assert!(page.contains(r#"<div class="summary"><p>Use list comprehensions.</p></div>"#));
    assert!(page.contains(r#"<pre class="code-block highlighted"><code class="language-python">"#));
    assert!(page.contains(r#"<span class="keyword">for</span>"#));
    assert!(page.contains("<ol>\n<li>init</li>\n<li>commit</li>\n</ol>"));
    assert!(page.contains(r#"<a href="/site/notes/python.md">"#));

    assert!(notes.public_dir.join("notes/python.md").exists());
    assert!(notes.public_dir.join("js/notes.js").exists());
}

#[test]
fn test_new_index_and_clean() {
    let (_dir, notes) = setup_site();
    fs::write(notes.notes_dir.join("draft.md"), "# Draft\n").unwrap();

    let added = notes_rs::commands::index::run(&notes).unwrap();
    assert_eq!(added, 1);

    let path = notes.new_note("Rust Ownership", &["rust".to_string()]).unwrap();
    assert!(path.ends_with("rust-ownership.md"));

    let index = NoteIndex::load(&notes.index_path()).unwrap();
    assert_eq!(index.entries.len(), 6);
    assert!(index.contains("draft.md"));
    assert!(index.contains("rust-ownership.md"));

    notes.generate().unwrap();
    let page = fs::read_to_string(notes.public_dir.join("index.html")).unwrap();
    assert!(page.contains(r#"<div class="note-card default" data-filename="rust-ownership.md">"#));

    notes.clean().unwrap();
    assert!(!notes.public_dir.exists());
}
