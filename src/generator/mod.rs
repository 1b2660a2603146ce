//! Generator module - writes the notes page and its assets

use anyhow::Result;
use std::fs;

use walkdir::WalkDir;

use crate::content::{Note, NoteLoader};
use crate::helpers::{format_date, html_escape, note_url, tag_span, url_for};
use crate::Notes;

/// Shown instead of the cards when the index cannot be loaded
pub const PLACEHOLDER: &str =
    r#"<p class="placeholder">Unable to load notes. Make sure notes/index.json exists.</p>"#;

const STYLE_CSS: &str = r##"body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 0 auto; max-width: 860px; padding: 2rem 1rem; color: #24292f; }
header { margin-bottom: 2rem; }
.note-card { border: 1px solid #d0d7de; border-left: 4px solid #8c959f; border-radius: 6px; padding: 1rem 1.25rem; margin-bottom: 1rem; cursor: pointer; }
.note-card.python { border-left-color: #3572a5; }
.note-card.git { border-left-color: #f05133; }
.note-card .date { color: #57606a; font-size: 0.875rem; margin: 0.25rem 0; }
.tag { display: inline-block; background: #eaeef2; border-radius: 1em; padding: 0 0.6em; font-size: 0.75rem; margin-right: 0.25rem; }
.hidden { display: none; }
.placeholder { color: #cf222e; }
pre.code-block { position: relative; background: #f6f8fa; padding: 1rem; overflow-x: auto; border-radius: 6px; }
.lang-label { position: absolute; top: 0.25rem; right: 0.5rem; font-size: 0.75rem; color: #57606a; }
.keyword { color: #cf222e; }
.comment { color: #6e7781; font-style: italic; }
.string { color: #0a3069; }
.number, .color { color: #0550ae; }
pre .tag { background: none; border-radius: 0; padding: 0; font-size: inherit; color: #116329; }
.property, .variable { color: #953800; }
.heading { color: #0550ae; font-weight: bold; }
.emphasis { font-style: italic; }
.link { color: #0969da; }
"##;

const NOTES_JS: &str = r#"document.addEventListener('DOMContentLoaded', function () {
  document.querySelectorAll('.note-card').forEach(function (card) {
    card.addEventListener('click', function (event) {
      if (event.target.closest('a')) return;
      var full = card.querySelector('.full-content');
      if (full) full.classList.toggle('hidden');
    });
  });
});
"#;

/// Static site generator for the notes page
pub struct Generator {
    notes: Notes,
}

impl Generator {
    /// Create a new generator
    pub fn new(notes: &Notes) -> Self {
        Self {
            notes: notes.clone(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.notes.public_dir)?;

        self.write_assets()?;
        self.copy_notes()?;

        let loader = NoteLoader::new(&self.notes);
        let cards = match loader.load_notes() {
            Ok(notes) => {
                tracing::info!("Loaded {} notes", notes.len());
                notes.iter().map(|n| self.render_card(n)).collect::<Vec<_>>().join("\n")
            }
            Err(e) => {
                tracing::warn!("Failed to load notes: {}", e);
                PLACEHOLDER.to_string()
            }
        };

        let page = self.render_page(&cards);
        fs::write(self.notes.public_dir.join("index.html"), page)?;
        tracing::info!("Generated index.html");

        Ok(())
    }

    /// Render one note card
    pub fn render_card(&self, note: &Note) -> String {
        let config = &self.notes.config;
        let tags = note
            .meta
            .tags
            .iter()
            .map(|t| tag_span(t))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            r#"<div class="note-card {category}" data-filename="{filename}">
<h3>{title}</h3>
<p class="date">{date}</p>
{tags}
<div class="summary">{summary}</div>
<div class="full-content hidden">{content}
<p class="source"><a href="{source}">Markdown source</a></p>
</div>
</div>"#,
            category = html_escape(&note.category),
            filename = html_escape(&note.meta.filename),
            title = html_escape(note.display_title()),
            date = html_escape(&format_date(&note.meta.date, &config.date_format)),
            tags = tags,
            summary = note.parsed.summary,
            content = note.parsed.full_content.as_deref().unwrap_or(""),
            source = html_escape(&note_url(config, &note.meta.filename)),
        )
    }

    /// Wrap the cards in the page shell
    fn render_page(&self, cards: &str) -> String {
        let config = &self.notes.config;
        let subtitle = if config.subtitle.is_empty() {
            String::new()
        } else {
            format!("\n<p class=\"subtitle\">{}</p>", html_escape(&config.subtitle))
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<meta name="author" content="{author}">
<meta name="generator" content="notes-rs {version}">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
</head>
<body>
<header>
<h1>{title}</h1>{subtitle}
</header>
<main id="notes-container">
{cards}
</main>
<script src="{js}"></script>
</body>
</html>
"#,
            lang = html_escape(&config.language),
            description = html_escape(&config.description),
            author = html_escape(&config.author),
            version = env!("CARGO_PKG_VERSION"),
            title = html_escape(&config.title),
            subtitle = subtitle,
            css = url_for(config, "css/style.css"),
            js = url_for(config, "js/notes.js"),
            cards = cards,
        )
    }

    /// Write the stylesheet and the card toggle script
    fn write_assets(&self) -> Result<()> {
        let public_dir = &self.notes.public_dir;
        fs::create_dir_all(public_dir.join("css"))?;
        fs::create_dir_all(public_dir.join("js"))?;
        fs::write(public_dir.join("css/style.css"), STYLE_CSS)?;
        fs::write(public_dir.join("js/notes.js"), NOTES_JS)?;
        Ok(())
    }

    /// Copy the notes directory (markdown files, index, images) to the public directory
    fn copy_notes(&self) -> Result<()> {
        let notes_dir = &self.notes.notes_dir;
        if !notes_dir.exists() {
            return Ok(());
        }

        let dest_root = self.notes.public_dir.join(&self.notes.config.notes_dir);
        let mut copied = 0;

        for entry in WalkDir::new(notes_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(notes_dir)?;
            let dest = dest_root.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} files to {:?}", copied, dest_root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{NoteMeta, ParsedResult};
    use tempfile::TempDir;

    fn sample_note() -> Note {
        let mut meta = NoteMeta::new("git.md", "Index Title", "2024-01-15");
        meta.tags = vec!["git".to_string(), "<cli>".to_string()];
        Note {
            meta,
            parsed: ParsedResult {
                title: Some("Git Basics".to_string()),
                summary: "<p>Short summary.</p>".to_string(),
                full_content: Some("<h1>Git Basics</h1>".to_string()),
            },
            category: "git".to_string(),
        }
    }

    #[test]
    fn test_render_card() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.date_format = "YYYY/MM/DD".to_string();
        let generator = Generator::new(&Notes::with_config(dir.path(), config));

        let html = generator.render_card(&sample_note());
        assert!(html.contains(r#"<div class="note-card git" data-filename="git.md">"#));
        assert!(html.contains("<h3>Git Basics</h3>"));
        assert!(html.contains(r#"<p class="date">2024/01/15</p>"#));
        assert!(html.contains(r#"<span class="tag">&lt;cli&gt;</span>"#));
        assert!(html.contains(r#"<div class="summary"><p>Short summary.</p></div>"#));
        assert!(html.contains(r#"<div class="full-content hidden"><h1>Git Basics</h1>"#));
        assert!(html.contains(r#"<a href="/notes/git.md">"#));
    }

    #[test]
    fn test_generate_without_index_shows_placeholder() {
        let dir = TempDir::new().unwrap();
        let notes = Notes::with_config(dir.path(), SiteConfig::default());
        Generator::new(&notes).generate().unwrap();

        let page = fs::read_to_string(notes.public_dir.join("index.html")).unwrap();
        assert!(page.contains(PLACEHOLDER));
        assert!(notes.public_dir.join("css/style.css").exists());
        assert!(notes.public_dir.join("js/notes.js").exists());
    }
}
