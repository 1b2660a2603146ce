//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/notes-site/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// URL of a note's raw markdown file, as the site serves it
pub fn note_url(config: &SiteConfig, filename: &str) -> String {
    url_for(
        config,
        &format!("{}/{}", config.notes_dir.trim_matches('/'), filename),
    )
}
