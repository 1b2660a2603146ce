//! notes-rs: a static personal notes site generator
//!
//! Markdown notes listed in `notes/index.json` are rendered into a single
//! page of cards, each with a title, date, tags, a short summary and the
//! collapsible full content. The markdown renderer and the code highlighter
//! are plain text transforms and can be used on their own.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod highlight;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main notes site application
#[derive(Debug, Clone)]
pub struct Notes {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown notes and the index
    pub notes_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Notes {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let notes_dir = base_dir.join(&config.notes_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            notes_dir,
            public_dir,
        }
    }

    /// Path of the note index file
    pub fn index_path(&self) -> PathBuf {
        self.notes_dir.join(&self.config.index_file)
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new note
    pub fn new_note(&self, title: &str, tags: &[String]) -> Result<PathBuf> {
        commands::new::run(self, title, tags)
    }
}
