//! Markdown rendering: title and summary extraction plus HTML emission

use serde::Serialize;

use super::syntax::{fence_info, is_fence_close, parse_blocks, Block, Inline};
use crate::helpers::{html_escape, truncate_chars};

/// Default character budget of a summary
pub const DEFAULT_SUMMARY_LENGTH: usize = 250;

/// Appended to a summary that was cut short
const ELLIPSIS: &str = "...";

/// Result of parsing one markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    /// Text of the first level-1 heading
    pub title: Option<String>,
    /// Excerpt wrapped in `<p>`, empty when the document has no paragraph
    pub summary: String,
    /// Full HTML rendering, `None` in summary-only mode
    pub full_content: Option<String>,
}

impl ParsedResult {
    /// Title, or the empty string when the document has none
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Markdown renderer producing card summaries and full HTML
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    summary_length: usize,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            summary_length: DEFAULT_SUMMARY_LENGTH,
        }
    }

    /// Create with a custom summary budget
    pub fn with_summary_length(summary_length: usize) -> Self {
        Self { summary_length }
    }

    /// Extract title and summary, and render the full document
    pub fn parse(&self, markdown: &str) -> ParsedResult {
        ParsedResult {
            full_content: Some(self.render(markdown)),
            ..self.parse_summary(markdown)
        }
    }

    /// Extract title and summary only
    pub fn parse_summary(&self, markdown: &str) -> ParsedResult {
        ParsedResult {
            title: extract_title(markdown),
            summary: extract_summary(markdown, self.summary_length),
            full_content: None,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let blocks = parse_blocks(markdown);
        tracing::trace!("Parsed {} blocks", blocks.len());
        blocks
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of the first `# ` heading, ignoring fenced code
pub fn extract_title(markdown: &str) -> Option<String> {
    let mut in_code = false;

    for line in markdown.lines() {
        if in_code {
            in_code = !is_fence_close(line);
            continue;
        }
        if fence_info(line).is_some() {
            in_code = true;
            continue;
        }
        if let Some(title) = line.strip_prefix("# ") {
            let title = title.trim();
            return (!title.is_empty()).then(|| title.to_string());
        }
    }

    None
}

/// Summary of the first one or two paragraphs, truncated to `budget` chars
///
/// Headings and fenced code are skipped; lines of a paragraph are joined by
/// single spaces. Returns an empty string when there is no paragraph.
pub fn extract_summary(markdown: &str, budget: usize) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code = false;

    for line in markdown.lines() {
        let line = line.trim();

        if in_code {
            in_code = !is_fence_close(line);
            continue;
        }
        if fence_info(line).is_some() {
            in_code = true;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    if paragraphs.is_empty() {
        return String::new();
    }

    let text = paragraphs
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    format!("<p>{}</p>", truncate_chars(&text, budget, ELLIPSIS))
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, content } => {
            format!("<h{0}>{1}</h{0}>", level, render_inlines(content))
        }
        Block::Code { lang, code } if lang.is_empty() => {
            format!(
                r#"<pre class="code-block"><code>{}</code></pre>"#,
                html_escape(code)
            )
        }
        Block::Code { lang, code } => format!(
            r#"<pre class="code-block"><code class="language-{}">{}</code></pre>"#,
            html_escape(lang),
            html_escape(code)
        ),
        Block::Quote(lines) => {
            let mut html = String::from("<blockquote>\n");
            for line in lines {
                html.push_str(&format!("<p>{}</p>\n", render_inlines(line)));
            }
            html.push_str("</blockquote>");
            html
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let mut html = format!("<{}>\n", tag);
            for item in items {
                html.push_str(&format!("<li>{}</li>\n", render_inlines(item)));
            }
            html.push_str(&format!("</{}>", tag));
            html
        }
        Block::Rule => "<hr>".to_string(),
        Block::Html(content) => render_inlines(content),
        Block::Paragraph(content) => format!("<p>{}</p>", render_inlines(content)),
    }
}

fn render_inlines(nodes: &[Inline]) -> String {
    let mut html = String::new();

    for node in nodes {
        match node {
            Inline::Text(text) => html.push_str(text),
            Inline::Strong(inner) => {
                html.push_str(&format!("<strong>{}</strong>", render_inlines(inner)))
            }
            Inline::Emphasis(inner) => html.push_str(&format!("<em>{}</em>", render_inlines(inner))),
            Inline::Strike(inner) => html.push_str(&format!("<del>{}</del>", render_inlines(inner))),
            Inline::Code(code) => html.push_str(&format!("<code>{}</code>", html_escape(code))),
            Inline::Link { text, url } => html.push_str(&format!(
                r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
                html_escape(url),
                render_inlines(text)
            )),
            Inline::Image { alt, url } => html.push_str(&format!(
                r#"<img src="{}" alt="{}">"#,
                html_escape(url),
                html_escape(alt)
            )),
        }
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_summary() {
        let renderer = MarkdownRenderer::new();
        let parsed = renderer.parse("# Hello\n\nThis is a test.\n\nSecond paragraph.");
        assert_eq!(parsed.title.as_deref(), Some("Hello"));
        assert_eq!(parsed.summary, "<p>This is a test. Second paragraph.</p>");
        assert!(parsed.full_content.is_some());
    }

    #[test]
    fn test_parse_summary_only() {
        let renderer = MarkdownRenderer::new();
        let parsed = renderer.parse_summary("# T\n\nbody");
        assert_eq!(parsed.title_or_empty(), "T");
        assert_eq!(parsed.full_content, None);
    }

    #[test]
    fn test_title_first_heading_only() {
        assert_eq!(
            extract_title("intro\n#  Spaced Title  \n# Second"),
            Some("Spaced Title".to_string())
        );
        assert_eq!(extract_title("## Not level one\ntext"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_title_skips_code_comments() {
        let md = "```bash\n# install deps\n```\n# Real Title";
        assert_eq!(extract_title(md), Some("Real Title".to_string()));
    }

    #[test]
    fn test_summary_skips_code_blocks() {
        let md = "# T\n\n```python\nsecret_line = 1\n\nanother\n```\n\nVisible text.";
        let summary = extract_summary(md, 250);
        assert_eq!(summary, "<p>Visible text.</p>");
    }

    #[test]
    fn test_summary_joins_lines_and_limits_paragraphs() {
        let md = "line one\nline two\n\nsecond\n\nthird is dropped";
        assert_eq!(extract_summary(md, 250), "<p>line one line two second</p>");
    }

    #[test]
    fn test_summary_run_on_block() {
        assert_eq!(extract_summary("just one block", 250), "<p>just one block</p>");
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(extract_summary("# Only a heading\n\n```\ncode\n```", 250), "");
        assert_eq!(extract_summary("", 250), "");
    }

    #[test]
    fn test_summary_truncation() {
        let long = "word ".repeat(100);
        let summary = extract_summary(&long, 150);
        let inner = summary
            .strip_prefix("<p>")
            .and_then(|s| s.strip_suffix("</p>"))
            .unwrap();
        assert!(inner.ends_with("..."));
        assert!(inner.chars().count() <= 153);

        let short = extract_summary("short text", 150);
        assert!(!short.contains("..."));
    }

    #[test]
    fn test_summary_counts_chars() {
        let text = "笔".repeat(10);
        let summary = extract_summary(&text, 4);
        assert_eq!(summary, "<p>笔笔笔笔...</p>");
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```python\nprint(1)\n```");
        assert!(html.contains(
            r#"<pre class="code-block"><code class="language-python">print(1)</code></pre>"#
        ));
    }

    #[test]
    fn test_render_code_block_escapes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```html\n<b>\"x\" & 'y'</b>\n```");
        assert!(html.contains("&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_render_code_block_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n*not emphasis*\n```");
        assert_eq!(
            html,
            r#"<pre class="code-block"><code>*not emphasis*</code></pre>"#
        );
    }

    #[test]
    fn test_render_headings() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# One\n## Two\n###### Six");
        assert_eq!(html, "<h1>One</h1>\n<h2>Two</h2>\n<h6>Six</h6>");
    }

    #[test]
    fn test_render_inline_formatting() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("**b** __b2__ *i* _i2_ ~~gone~~ `x<y`");
        assert_eq!(
            html,
            "<p><strong>b</strong> <strong>b2</strong> <em>i</em> <em>i2</em> <del>gone</del> <code>x&lt;y</code></p>"
        );
    }

    #[test]
    fn test_render_links_and_images() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("See [docs](https://docs.rs) and ![cat](cat.png)");
        assert_eq!(
            html,
            r#"<p>See <a href="https://docs.rs" target="_blank" rel="noopener">docs</a> and <img src="cat.png" alt="cat"></p>"#
        );
    }

    #[test]
    fn test_render_unordered_list_wrapped_once() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- item one\n- item two\n- item three");
        assert_eq!(html.matches("<li>").count(), 3);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("</ul>").count(), 1);
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn test_render_ordered_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("1. first\n2. second");
        assert_eq!(html, "<ol>\n<li>first</li>\n<li>second</li>\n</ol>");
    }

    #[test]
    fn test_render_blockquote() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("> line one\n> line two\n\nafter");
        assert_eq!(
            html,
            "<blockquote>\n<p>line one</p>\n<p>line two</p>\n</blockquote>\n<p>after</p>"
        );
    }

    #[test]
    fn test_render_rule_and_paragraphs() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("above\n---\nbelow");
        assert_eq!(html, "<p>above</p>\n<hr>\n<p>below</p>");
    }

    #[test]
    fn test_render_keeps_html_lines() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<details>\nplain\n</details>");
        assert_eq!(html, "<details>\n<p>plain</p>\n</details>");
    }

    #[test]
    fn test_render_inline_spans_on_html_lines() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<kbd>Ctrl</kbd> + **C** and [docs](https://x.dev)");
        assert_eq!(
            html,
            concat!(
                "<kbd>Ctrl</kbd> + <strong>C</strong> and ",
                r#"<a href="https://x.dev" target="_blank" rel="noopener">docs</a>"#
            )
        );
    }

    #[test]
    fn test_one_line_fence_does_not_swallow_document() {
        let renderer = MarkdownRenderer::new();
        let md = "```js```\n# Title\n\nafter";
        let html = renderer.render(md);
        assert!(!html.contains("<pre"));
        assert!(html.contains("<code>js</code>"));
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>after</p>"));

        assert_eq!(extract_title(md).as_deref(), Some("Title"));
        assert_eq!(extract_summary(md, 250), "<p>```js``` after</p>");
    }

    #[test]
    fn test_rerender_wraps_bare_lines() {
        let renderer = MarkdownRenderer::new();
        let first = renderer.render("# Title\n\n```\na\nb\n```");
        let second = renderer.render(&first);
        assert!(second.starts_with("<h1>Title</h1>"));
        // The inner code line that does not start with a tag gets wrapped
        assert!(second.contains("<p>b</code></pre></p>"));
    }

    #[test]
    fn test_render_empty() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render(""), "");
        let parsed = renderer.parse("");
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.summary, "");
        assert_eq!(parsed.full_content.as_deref(), Some(""));
    }
}
