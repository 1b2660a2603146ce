//! Per-language token rules

use lazy_static::lazy_static;
use regex::Regex;

/// Languages with a rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    JavaScript,
    Bash,
    Html,
    Css,
    Json,
    Markdown,
}

impl Language {
    /// Parse a fence language tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "python" | "py" => Some(Self::Python),
            "javascript" | "js" => Some(Self::JavaScript),
            "bash" | "shell" | "sh" => Some(Self::Bash),
            "html" => Some(Self::Html),
            "css" => Some(Self::Css),
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Returns the language name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Bash => "bash",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    /// Token rules in priority order
    pub(crate) fn rules(&self) -> &'static [Rule] {
        match self {
            Self::Python => PYTHON.as_slice(),
            Self::JavaScript => JAVASCRIPT.as_slice(),
            Self::Bash => BASH.as_slice(),
            Self::Html => HTML.as_slice(),
            Self::Css => CSS.as_slice(),
            Self::Json => JSON.as_slice(),
            Self::Markdown => MARKDOWN.as_slice(),
        }
    }
}

/// HTML class names for highlighted tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightClass {
    Keyword,
    Comment,
    String,
    Number,
    Tag,
    Property,
    Color,
    Variable,
    Heading,
    Emphasis,
    Link,
}

impl HighlightClass {
    /// CSS class name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Tag => "tag",
            Self::Property => "property",
            Self::Color => "color",
            Self::Variable => "variable",
            Self::Heading => "heading",
            Self::Emphasis => "emphasis",
            Self::Link => "link",
        }
    }
}

/// A token pattern and the class it gets
pub(crate) struct Rule {
    pub class: HighlightClass,
    pub pattern: Regex,
}

fn rule(class: HighlightClass, pattern: &str) -> Rule {
    Rule {
        class,
        pattern: Regex::new(pattern).expect("highlight rule must compile"),
    }
}

const DOUBLE_QUOTED: &str = r#""(?:[^"\\\n]|\\.)*""#;
const SINGLE_QUOTED: &str = r#"'(?:[^'\\\n]|\\.)*'"#;

lazy_static! {
    static ref PYTHON: Vec<Rule> = vec![
        rule(HighlightClass::Comment, r"#.*"),
        rule(
            HighlightClass::String,
            &format!(r#"(?s)"""(?:.*?)"""|'''(?:.*?)'''|{}|{}"#, DOUBLE_QUOTED, SINGLE_QUOTED),
        ),
        rule(
            HighlightClass::Keyword,
            r"\b(?:def|class|if|else|elif|for|while|import|from|return|True|False|None|try|except|finally|with|as|in|is|not|and|or|lambda|yield|pass|break|continue|raise|global|nonlocal|async|await)\b",
        ),
        rule(HighlightClass::Number, r"\b\d+(?:\.\d+)?\b"),
    ];

    static ref JAVASCRIPT: Vec<Rule> = vec![
        rule(HighlightClass::Comment, r"(?s)//[^\n]*|/\*.*?\*/"),
        rule(
            HighlightClass::String,
            &format!(r"{}|{}|`(?:[^`\\]|\\.)*`", DOUBLE_QUOTED, SINGLE_QUOTED),
        ),
        rule(
            HighlightClass::Keyword,
            r"\b(?:var|let|const|function|return|if|else|for|while|do|switch|case|break|continue|new|this|class|extends|import|export|default|async|await|try|catch|finally|throw|typeof|instanceof|of|in|null|undefined|true|false)\b",
        ),
        rule(HighlightClass::Number, r"\b\d+(?:\.\d+)?\b"),
    ];

    static ref BASH: Vec<Rule> = vec![
        rule(HighlightClass::Comment, r"(?m)(?:^|[ \t])#.*"),
        rule(HighlightClass::String, &format!("{}|{}", DOUBLE_QUOTED, SINGLE_QUOTED)),
        rule(HighlightClass::Variable, r"\$\{[^}\n]*\}|\$[A-Za-z_][A-Za-z0-9_]*"),
        rule(
            HighlightClass::Keyword,
            r"\b(?:if|then|else|elif|fi|for|in|do|done|while|until|case|esac|function|return|exit|local|export|echo|read|cd|ls|mkdir|rm|cp|mv|sudo|git|npm|yarn|docker|cargo|pip)\b",
        ),
    ];

    static ref HTML: Vec<Rule> = vec![
        rule(HighlightClass::Comment, r"(?s)<!--.*?-->"),
        rule(
            HighlightClass::Tag,
            r#"</?[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][-A-Za-z0-9_:.]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+))?)*\s*/?>"#,
        ),
    ];

    static ref CSS: Vec<Rule> = vec![
        rule(HighlightClass::Comment, r"(?s)/\*.*?\*/"),
        rule(HighlightClass::String, &format!("{}|{}", DOUBLE_QUOTED, SINGLE_QUOTED)),
        rule(HighlightClass::Color, r"#[0-9a-fA-F]{3,8}\b"),
        rule(HighlightClass::Property, r"[A-Za-z-]+\s*:"),
        rule(HighlightClass::Number, r"\b\d+(?:\.\d+)?(?:px|em|rem|vh|vw|ms|s|%)?"),
    ];

    static ref JSON: Vec<Rule> = vec![
        rule(HighlightClass::Property, &format!(r"{}\s*:", DOUBLE_QUOTED)),
        rule(HighlightClass::String, DOUBLE_QUOTED),
        rule(HighlightClass::Keyword, r"\b(?:true|false|null)\b"),
        rule(HighlightClass::Number, r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b"),
    ];

    static ref MARKDOWN: Vec<Rule> = vec![
        rule(HighlightClass::Heading, r"(?m)^#{1,6}[ \t].*$"),
        rule(HighlightClass::Comment, r"(?m)^>.*$"),
        rule(HighlightClass::Keyword, r"(?m)^[ \t]*(?:[-*+]|\d+\.)[ \t]"),
        rule(HighlightClass::String, r"`[^`\n]+`"),
        rule(HighlightClass::Link, r"!?\[[^\]\n]*\]\([^)\n]*\)"),
        rule(HighlightClass::Emphasis, r"\*\*[^*\n]+\*\*|\*[^*\n]+\*|__[^_\n]+__"),
    ];
}
