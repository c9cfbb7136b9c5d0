//! thoughts-rs: content index for an MDX-backed blog
//!
//! Reads a directory of articles with front matter, derives a slug from each
//! filename, and answers listing and lookup queries for the page layer.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod sitemap;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::ContentIndex;

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the article files
    pub content_dir: PathBuf,
    /// Output directory for generated files such as the sitemap
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Content index configured for this site
    pub fn index(&self) -> Result<ContentIndex> {
        let extensions: Vec<&str> = self.config.extensions.iter().map(String::as_str).collect();
        Ok(ContentIndex::new(&self.content_dir, &extensions)
            .with_policy(self.config.on_parse_error)
            .with_timezone(self.config.tz()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("src/posts"));
        assert_eq!(site.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_site_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "content_dir: articles\nextensions: [md]\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("articles")).unwrap();
        fs::write(
            dir.path().join("articles").join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\nHi\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let index = site.index().unwrap();
        assert_eq!(index.content_dir(), dir.path().join("articles"));
        assert_eq!(index.slugs().unwrap(), vec!["hello"]);
    }
}
