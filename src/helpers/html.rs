//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Reverse `html_escape`
///
/// `&amp;` is decoded last so `&amp;lt;` comes back as `&lt;`.
pub fn html_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Truncate a string to `length` characters and append `omission`
///
/// The omission is only appended when something was cut, so the result is
/// at most `length + omission.chars().count()` characters long.
pub fn truncate_chars(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Generate a tag label span
pub fn tag_span(tag: &str) -> String {
    format!(r#"<span class="tag">{}</span>"#, html_escape(tag))
}
