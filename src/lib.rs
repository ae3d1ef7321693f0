//! mdsite: a minimal markdown-file-backed website server
//!
//! Serves a directory of markdown files as a website: blog posts with
//! `---`-delimited front-matter headers, standalone top-level pages, and
//! free-text search. Every request re-reads the files it needs; there is no
//! cache and no shared mutable state.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main site instance
///
/// Holds the resolved directory layout; the content root is explicit
/// configuration rather than a global.
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding top-level pages
    pub content_dir: PathBuf,
    /// Posts directory under the content directory
    pub posts_dir: PathBuf,
    /// Static assets directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let posts_dir = content_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            posts_dir,
            public_dir,
        })
    }

    /// Create a content store over this site's directories
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(&self.content_dir, &self.posts_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("content"));
        assert_eq!(site.posts_dir, dir.path().join("content/posts"));
        assert_eq!(site.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_site_reads_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "content_dir: docs\nposts_dir: articles\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("docs"));
        assert_eq!(site.posts_dir, dir.path().join("docs/articles"));
    }
}
