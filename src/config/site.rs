//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub root: String,

    // Directory
    pub notes_dir: String,
    pub index_file: String,
    pub public_dir: String,

    // Cards
    /// Character budget of a card summary (before the ellipsis)
    pub summary_length: usize,
    /// Moment.js style format used for card dates
    pub date_format: String,
    /// Tags that give a card its category class, in priority order
    pub categories: Vec<String>,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Notes".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            root: "/".to_string(),

            notes_dir: "notes".to_string(),
            index_file: "index.json".to_string(),
            public_dir: "public".to_string(),

            summary_length: 250,
            date_format: "MMMM DD, YYYY".to_string(),
            categories: vec!["python".to_string(), "git".to_string()],

            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Pick the category class for a note from its tags
    ///
    /// The first configured category present in `tags` (case-insensitive)
    /// wins; notes without a match get `default`.
    pub fn category_for(&self, tags: &[String]) -> String {
        let lower: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
        self.categories
            .iter()
            .find(|c| lower.contains(&c.to_lowercase()))
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| "default".to_string())
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub lang_label: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            lang_label: true,
        }
    }
}
