//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub content_dir: String,
    pub blog_dir: String,
    pub markdown_extensions: Vec<String>,

    // Listings
    pub recent_posts: usize,
    pub related_posts: usize,
    pub words_per_minute: usize,

    // Date format (chrono strftime)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            blog_dir: "blog".to_string(),
            markdown_extensions: vec!["md".to_string()],

            recent_posts: 4,
            related_posts: 3,
            words_per_minute: 200,

            date_format: "%B %-d, %Y".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        // An empty file is valid YAML for "nothing set"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }
}
