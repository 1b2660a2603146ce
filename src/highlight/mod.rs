//! Syntax highlighting for rendered code blocks
//!
//! Each language has an ordered list of token rules. Code is scanned left to
//! right: at every step the earliest match of any rule wins, ties going to the
//! rule listed first. Matched tokens are wrapped in `<span class="…">` and
//! everything is HTML-escaped on the way out.

mod rules;

pub use rules::{HighlightClass, Language};

use lazy_static::lazy_static;
use regex::{Captures, Match, Regex};

use crate::helpers::{html_escape, html_unescape};

lazy_static! {
    /// A code block as emitted by the markdown renderer, not yet highlighted
    static ref CODE_BLOCK: Regex = Regex::new(
        r#"(?s)<pre class="code-block"><code class="language-([^"]*)">(.*?)</code></pre>"#
    )
    .expect("code block pattern must compile");
}

/// Highlights code blocks in rendered notes
#[derive(Debug, Clone)]
pub struct Highlighter {
    lang_label: bool,
}

impl Highlighter {
    /// Create a highlighter that labels blocks with their language
    pub fn new() -> Self {
        Self { lang_label: true }
    }

    /// Create with custom settings
    pub fn with_options(lang_label: bool) -> Self {
        Self { lang_label }
    }

    /// Highlight raw code; unknown languages are only escaped
    pub fn highlight_code(&self, code: &str, tag: &str) -> String {
        match Language::from_tag(tag) {
            Some(lang) => highlight(code, lang),
            None => html_escape(code),
        }
    }

    /// Highlight every code block of a rendered HTML fragment
    ///
    /// Processed blocks get the `highlighted` class, which the block pattern
    /// does not match, so running this twice changes nothing.
    pub fn highlight_html(&self, html: &str) -> String {
        CODE_BLOCK
            .replace_all(html, |caps: &Captures| {
                let tag = html_unescape(&caps[1]);
                if tag.is_empty() {
                    return caps[0].to_string();
                }
                self.highlight_block(&tag, &caps[2])
            })
            .into_owned()
    }

    fn highlight_block(&self, tag: &str, escaped: &str) -> String {
        let body = match Language::from_tag(tag) {
            Some(lang) => highlight(&html_unescape(escaped), lang),
            None => escaped.to_string(),
        };

        let label = if self.lang_label {
            format!(r#"<div class="lang-label">{}</div>"#, html_escape(tag))
        } else {
            String::new()
        };

        format!(
            r#"<pre class="code-block highlighted"><code class="language-{}">{}</code>{}</pre>"#,
            html_escape(tag),
            body,
            label
        )
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap the tokens of `code` in classed spans
pub fn highlight(code: &str, lang: Language) -> String {
    let rules = lang.rules();
    let mut out = String::with_capacity(code.len() * 2);

    // Next match of each rule at or after `pos`; rules that can only
    // match the empty string are dropped
    let find = |index: usize, pos: usize| {
        rules[index]
            .pattern
            .find_at(code, pos)
            .filter(|m| !m.as_str().is_empty())
    };
    let mut pending: Vec<Option<Match>> = (0..rules.len()).map(|i| find(i, 0)).collect();
    let mut pos = 0;

    loop {
        for (index, slot) in pending.iter_mut().enumerate() {
            if matches!(slot, Some(m) if m.start() < pos) {
                *slot = find(index, pos);
            }
        }

        let next = pending
            .iter()
            .enumerate()
            .filter_map(|(index, m)| m.map(|m| (index, m)))
            .min_by_key(|(_, m)| m.start());

        let (index, token) = match next {
            Some(found) => found,
            None => break,
        };

        out.push_str(&html_escape(&code[pos..token.start()]));
        out.push_str(&format!(
            r#"<span class="{}">{}</span>"#,
            rules[index].class.as_str(),
            html_escape(token.as_str())
        ));
        pos = token.end();
    }

    out.push_str(&html_escape(&code[pos..]));
    out
}
