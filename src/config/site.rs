//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // Directory
    pub content_dir: String,
    /// Posts subdirectory, relative to the content directory
    pub posts_dir: String,
    pub public_dir: String,

    // Server
    pub host: String,
    pub port: u16,

    /// Date format for post listings (chrono strftime)
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            host: "localhost".to_string(),
            port: 3000,

            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
