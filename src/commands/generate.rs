//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Notes, CONFIG_FILE};

/// Generate the static site
pub fn run(notes: &Notes) -> Result<()> {
    let start = Instant::now();

    Generator::new(notes).generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch the notes directory and config, regenerating on change
pub async fn watch(notes: &Notes) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&notes.notes_dir, notify::RecursiveMode::Recursive)?;

    let config_path = notes.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = reload(notes).and_then(|notes| run(&notes)) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

/// Re-read the config so edits to `_config.yml` take effect
pub(crate) fn reload(notes: &Notes) -> Result<Notes> {
    Notes::new(&notes.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_initialized_site() {
        let dir = TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let notes = Notes::new(dir.path()).unwrap();

        run(&notes).unwrap();

        let page = fs::read_to_string(notes.public_dir.join("index.html")).unwrap();
        assert!(page.contains(r#"<div class="note-card python" data-filename="hello-notes.md">"#));
        assert!(page.contains("<h3>Hello Notes</h3>"));
        assert!(notes.public_dir.join("notes/hello-notes.md").exists());
        assert!(notes.public_dir.join("notes/index.json").exists());
    }

    #[test]
    fn test_reload_picks_up_config_changes() {
        let dir = TempDir::new().unwrap();
        let notes = Notes::new(dir.path()).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "title: Changed\n").unwrap();

        let reloaded = reload(&notes).unwrap();
        assert_eq!(reloaded.config.title, "Changed");
    }
}
