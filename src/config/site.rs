//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What the content index does with a file whose front matter cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// The whole listing fails on the first malformed file
    #[default]
    Fail,
    /// The malformed file is logged and left out of the listing
    Skip,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Content
    pub content_dir: String,
    pub extensions: Vec<String>,
    pub on_parse_error: ParsePolicy,

    // Listing
    pub listing_path: String,
    pub latest_posts: usize,

    // Date / Time
    pub date_format: String,
    pub timezone: String,

    // Output
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Buti".to_string(),
            url: "https://nobuti.com".to_string(),

            content_dir: "src/posts".to_string(),
            extensions: vec!["mdx".to_string()],
            on_parse_error: ParsePolicy::Fail,

            listing_path: "thoughts".to_string(),
            latest_posts: 5,

            date_format: "MMMM D, YYYY".to_string(),
            timezone: "UTC".to_string(),

            public_dir: "public".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configured timezone name
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {}", self.timezone, e))
    }

    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            anyhow::bail!("`extensions` must list at least one file extension");
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.starts_with('.')) {
            anyhow::bail!("extension {:?} must be given without the leading dot", ext);
        }
        self.tz()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "src/posts");
        assert_eq!(config.extensions, vec!["mdx"]);
        assert_eq!(config.on_parse_error, ParsePolicy::Fail);
        assert_eq!(config.latest_posts, 5);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Thoughts
content_dir: content/articles
extensions: [mdx, md]
on_parse_error: skip
timezone: Europe/Madrid
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Thoughts");
        assert_eq!(config.content_dir, "content/articles");
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        assert_eq!(config.on_parse_error, ParsePolicy::Skip);
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Madrid);
        // Unset keys keep their defaults
        assert_eq!(config.listing_path, "thoughts");
    }

    #[test]
    fn test_load_rejects_bad_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "timezone: Mars/Olympus\n").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_dotted_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "extensions: [.mdx]\n").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
