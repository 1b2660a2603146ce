//! Render a single markdown file to stdout

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::MarkdownRenderer;
use crate::highlight::Highlighter;
use crate::Notes;

/// Output options of the render command
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Skip the full content
    pub summary_only: bool,
    /// Print the parse result as JSON instead of HTML
    pub json: bool,
    /// Highlight code blocks of the full content
    pub highlight: bool,
}

/// Render `file` and return what the command prints
pub fn run(notes: &Notes, file: &Path, options: RenderOptions) -> Result<String> {
    let markdown =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;

    let renderer = MarkdownRenderer::with_summary_length(notes.config.summary_length);
    let mut parsed = if options.summary_only {
        renderer.parse_summary(&markdown)
    } else {
        renderer.parse(&markdown)
    };

    if options.highlight {
        let highlighter = Highlighter::with_options(notes.config.highlight.lang_label);
        parsed.full_content = parsed
            .full_content
            .map(|html| highlighter.highlight_html(&html));
    }

    tracing::debug!("Rendered {:?}", file);

    if options.json {
        return Ok(serde_json::to_string_pretty(&parsed)?);
    }

    Ok(match parsed.full_content {
        Some(content) => content,
        None => parsed.summary,
    })
}
