//! Listing policy: which articles a page shows and in what order

use std::cmp::Ordering;

use super::ArticleMeta;

/// Environment variable consulted by [`Mode::from_env`]
pub const MODE_ENV: &str = "SITE_ENV";

/// Whether drafts are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    /// Read the mode from `SITE_ENV`; anything but `development`/`dev` is production
    pub fn from_env() -> Self {
        std::env::var(MODE_ENV)
            .map(|v| Self::from_name(&v))
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Mode::Development,
            _ => Mode::Production,
        }
    }

    pub fn shows_drafts(self) -> bool {
        self == Mode::Development
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Drop drafts unless `mode` shows them
pub fn visible(articles: Vec<ArticleMeta>, mode: Mode) -> Vec<ArticleMeta> {
    if mode.shows_drafts() {
        return articles;
    }
    articles.into_iter().filter(|a| !a.draft).collect()
}

/// Sort by date; equal dates fall back to ascending slug in either order
pub fn sort_articles(articles: &mut [ArticleMeta], order: Order) {
    articles.sort_by(|a, b| {
        let by_date = match order {
            Order::NewestFirst => b.date.cmp(&a.date),
            Order::OldestFirst => a.date.cmp(&b.date),
        };
        match by_date {
            Ordering::Equal => a.slug.cmp(&b.slug),
            other => other,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn meta(slug: &str, (y, m, d): (i32, u32, u32), draft: bool) -> ArticleMeta {
        ArticleMeta {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
            excerpt: None,
            draft,
            source: PathBuf::from(format!("{slug}.mdx")),
            extra: IndexMap::new(),
        }
    }

    fn slugs(articles: &[ArticleMeta]) -> Vec<&str> {
        articles.iter().map(|a| a.slug.as_str()).collect()
    }

    #[test]
    fn test_drafts_hidden_in_production_only() {
        let articles = vec![meta("a", (2024, 1, 1), true), meta("b", (2024, 1, 1), false)];

        let public = visible(articles.clone(), Mode::Production);
        assert_eq!(slugs(&public), vec!["b"]);

        let dev = visible(articles, Mode::Development);
        assert_eq!(slugs(&dev), vec!["a", "b"]);
    }

    #[test]
    fn test_newer_date_sorts_first() {
        let mut articles = vec![meta("january", (2024, 1, 1), false), meta("june", (2024, 6, 1), false)];

        sort_articles(&mut articles, Order::NewestFirst);
        assert_eq!(slugs(&articles), vec!["june", "january"]);

        sort_articles(&mut articles, Order::OldestFirst);
        assert_eq!(slugs(&articles), vec!["january", "june"]);
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(Mode::from_name("development"), Mode::Development);
        assert_eq!(Mode::from_name(" Dev "), Mode::Development);
        assert_eq!(Mode::from_name("production"), Mode::Production);
        assert_eq!(Mode::from_name(""), Mode::Production);
    }
}
