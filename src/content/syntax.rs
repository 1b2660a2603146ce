//! Markdown syntax tree and the line scanner that builds it
//!
//! Parsing is split in two passes: block structure is decided line by line,
//! then the text of each block is scanned for inline spans. HTML emission
//! lives in the `markdown` module and never looks at raw markdown again, so
//! no rule can re-match markup produced by another.

/// A block-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading, level 1 to 6
    Heading { level: usize, content: Vec<Inline> },
    /// Fenced code block; `lang` is empty when the fence has no tag
    Code { lang: String, code: String },
    /// Consecutive quote lines, one entry per non-empty line
    Quote(Vec<Vec<Inline>>),
    /// Run of list items of the same kind
    List { ordered: bool, items: Vec<Vec<Inline>> },
    /// Horizontal rule
    Rule,
    /// A line that already starts with an HTML tag; inline spans are
    /// rendered but the line is not wrapped in `<p>`
    Html(Vec<Inline>),
    /// Any other non-blank line
    Paragraph(Vec<Inline>),
}

/// An inline node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strike(Vec<Inline>),
    Code(String),
    Link { text: Vec<Inline>, url: String },
    Image { alt: String, url: String },
}

/// Split a markdown document into blocks
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if let Some(info) = fence_info(line) {
            let lang = info.split_whitespace().next().unwrap_or("").to_string();
            let mut code = Vec::new();
            i += 1;
            // An unterminated fence runs to the end of the document
            while i < lines.len() && !is_fence_close(lines[i]) {
                code.push(lines[i]);
                i += 1;
            }
            i += 1;
            blocks.push(Block::Code {
                lang,
                code: code.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        if let Some((level, text)) = heading(line) {
            blocks.push(Block::Heading {
                level,
                content: parse_inlines(text),
            });
            i += 1;
            continue;
        }

        if is_rule(trimmed) {
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if quote_text(line).is_some() {
            let mut quoted = Vec::new();
            while let Some(text) = lines.get(i).and_then(|l| quote_text(l)) {
                let text = text.trim();
                if !text.is_empty() {
                    quoted.push(parse_inlines(text));
                }
                i += 1;
            }
            blocks.push(Block::Quote(quoted));
            continue;
        }

        if let Some((ordered, _)) = list_item(line) {
            let mut items = Vec::new();
            loop {
                if let Some((kind, text)) = lines.get(i).and_then(|l| list_item(l)) {
                    if kind == ordered {
                        items.push(parse_inlines(text));
                        i += 1;
                        continue;
                    }
                    break;
                }

                // Blank lines between items of the same kind keep the list open
                let next = lines[i..].iter().position(|l| !l.trim().is_empty());
                match next {
                    Some(offset)
                        if offset > 0
                            && matches!(list_item(lines[i + offset]), Some((kind, _)) if kind == ordered) =>
                    {
                        i += offset;
                    }
                    _ => break,
                }
            }
            blocks.push(Block::List { ordered, items });
            continue;
        }

        if starts_with_tag(trimmed) {
            blocks.push(Block::Html(parse_inlines(line)));
        } else {
            blocks.push(Block::Paragraph(parse_inlines(trimmed)));
        }
        i += 1;
    }

    blocks
}

/// Info string of a fence opening line
///
/// A line like ```` ```js``` ```` closes itself and opens nothing.
pub(crate) fn fence_info(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix("```")
        .filter(|info| !info.contains('`'))
}

pub(crate) fn is_fence_close(line: &str) -> bool {
    line.trim().starts_with("```")
}

/// `## text` -> `(2, "text")`; the marker must start the line
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    rest.strip_prefix(' ').map(|text| (level, text.trim()))
}

fn is_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first @ ('-' | '*' | '_')) => trimmed.len() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}

/// Text of a quote line, accepting the marker in raw or entity-escaped form
fn quote_text(line: &str) -> Option<&str> {
    let line = line.trim_start();
    for marker in [">", "&gt;"] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.is_empty() {
                return Some(rest);
            }
            if let Some(text) = rest.strip_prefix(' ') {
                return Some(text);
            }
        }
    }
    None
}

/// `(ordered, text)` for `- x`, `* x`, `+ x` and `12. x`
fn list_item(line: &str) -> Option<(bool, &str)> {
    let line = line.trim_start();

    if let Some(rest) = line.strip_prefix(['-', '*', '+']) {
        return rest
            .starts_with([' ', '\t'])
            .then(|| (false, rest.trim()));
    }

    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix('.')
        .filter(|rest| rest.starts_with([' ', '\t']))
        .map(|rest| (true, rest.trim()))
}

fn starts_with_tag(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    chars.next() == Some('<')
        && chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '/')
            .unwrap_or(false)
}

/// Scan a line of text for inline spans
///
/// Unmatched markers are kept as literal text.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut pos = 0;

    while pos < text.len() {
        if let Some((node, used)) = scan_span(text, pos) {
            if !buf.is_empty() {
                nodes.push(Inline::Text(std::mem::take(&mut buf)));
            }
            nodes.push(node);
            pos += used;
            continue;
        }

        // pos always sits on a char boundary: spans only start on ASCII markers
        let ch = match text[pos..].chars().next() {
            Some(ch) => ch,
            None => break,
        };
        buf.push(ch);
        pos += ch.len_utf8();
    }

    if !buf.is_empty() {
        nodes.push(Inline::Text(buf));
    }

    nodes
}

/// Try to read one inline span starting at `pos`; returns it with its byte length
fn scan_span(text: &str, pos: usize) -> Option<(Inline, usize)> {
    let rest = &text[pos..];

    match rest.as_bytes().first().copied()? {
        b'`' => {
            let end = rest[1..].find('`')?;
            if end == 0 {
                return None;
            }
            Some((Inline::Code(rest[1..1 + end].to_string()), end + 2))
        }
        b'!' => {
            let (alt, url, used) = bracketed(&rest[1..], true)?;
            Some((
                Inline::Image {
                    alt: alt.to_string(),
                    url: url.to_string(),
                },
                used + 1,
            ))
        }
        b'[' => {
            let (label, url, used) = bracketed(rest, false)?;
            Some((
                Inline::Link {
                    text: parse_inlines(label),
                    url: url.to_string(),
                },
                used,
            ))
        }
        b'~' => {
            let (inner, used) = delimited(rest, "~~", false)?;
            Some((Inline::Strike(parse_inlines(inner)), used))
        }
        marker @ (b'*' | b'_') => {
            let intraword = marker == b'_';
            if intraword && preceded_by_word(text, pos) {
                return None;
            }
            let single = if intraword { "_" } else { "*" };
            let double = if intraword { "__" } else { "**" };

            if rest.starts_with(double) {
                if let Some((inner, used)) = delimited(rest, double, intraword) {
                    return Some((Inline::Strong(parse_inlines(inner)), used));
                }
            }
            let (inner, used) = delimited(rest, single, intraword)?;
            Some((Inline::Emphasis(parse_inlines(inner)), used))
        }
        _ => None,
    }
}

/// `[label](url)` at the start of `s`; returns label, url and consumed length
fn bracketed(s: &str, allow_empty_label: bool) -> Option<(&str, &str, usize)> {
    let body = s.strip_prefix('[')?;
    let close = body.find(']')?;
    if close == 0 && !allow_empty_label {
        return None;
    }
    let label = &body[..close];
    let after = body[close + 1..].strip_prefix('(')?;
    let url_end = after.find(')')?;
    let url = after[..url_end].trim();
    if url.is_empty() {
        return None;
    }
    // '[' + label + "](" + url + ')'
    Some((label, url, 1 + close + 2 + url_end + 1))
}

/// Content between an opening `delim` at the start of `s` and its closing twin
///
/// The content must not start or end with whitespace. A single-character
/// delimiter never closes on half of a doubled one, and with `intraword` set
/// the closer may not be followed by a letter or digit (`snake_case_names`).
fn delimited<'a>(s: &'a str, delim: &str, intraword: bool) -> Option<(&'a str, usize)> {
    let body = s.strip_prefix(delim)?;
    if body.is_empty() || body.starts_with(char::is_whitespace) {
        return None;
    }

    let mut search = 0;
    while let Some(found) = body[search..].find(delim) {
        let end = search + found;
        let after = &body[end + delim.len()..];
        let inner = &body[..end];

        let doubled = delim.len() == 1 && after.starts_with(delim);
        let glued = intraword
            && after
                .chars()
                .next()
                .map(char::is_alphanumeric)
                .unwrap_or(false);

        if doubled {
            search = end + 2;
            continue;
        }
        if inner.is_empty() || inner.ends_with(char::is_whitespace) || glued {
            search = end + delim.len();
            continue;
        }

        return Some((inner, delim.len() * 2 + end));
    }

    None
}

fn preceded_by_word(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .map(char::is_alphanumeric)
        .unwrap_or(false)
}
