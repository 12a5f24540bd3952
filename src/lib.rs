//! folio: markdown content repository for a portfolio and technical blog
//!
//! This crate reads markdown documents with YAML front-matter from a
//! content directory and answers read-only queries over them: posts sorted
//! by date, lookup by slug, tags, posts by tag and singleton pages.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

use content::ContentRepository;

/// The main folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content root directory
    pub content_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build a content repository rooted at the configured content directory
    pub fn repository(&self) -> ContentRepository {
        ContentRepository::new(&self.content_dir)
            .with_blog_dir(&self.config.blog_dir)
            .with_extensions(self.config.markdown_extensions.iter().cloned())
    }
}
