//! Show a single article

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::Article;
use crate::helpers::format_date;
use crate::Site;

/// Print the article for `slug`
pub fn run(site: &Site, slug: &str, json: bool) -> Result<()> {
    let article = site.index()?.get_article(slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        print!("{}", render_article(&site.config, &article));
    }
    Ok(())
}

/// Header block followed by the raw body
pub fn render_article(config: &SiteConfig, article: &Article) -> String {
    let meta = &article.meta;
    let mut out = String::new();

    if meta.draft {
        out.push_str("[draft] This article may not be ready for primetime.\n");
    }
    out.push_str(&format!("{}\n", meta.title));
    out.push_str(&format!("{}\n", format_date(&meta.date, &config.date_format)));
    if let Some(excerpt) = &meta.excerpt {
        out.push_str(&format!("{}\n", excerpt));
    }
    out.push('\n');
    out.push_str(&article.body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArticleMeta;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;
    use std::path::PathBuf;

    #[test]
    fn test_render_draft_article() {
        let article = Article {
            meta: ArticleMeta {
                slug: "wip".to_string(),
                title: "Work in progress".to_string(),
                date: Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(),
                excerpt: None,
                draft: true,
                source: PathBuf::from("wip.mdx"),
                extra: IndexMap::new(),
            },
            body: "Some <Component /> text\n".to_string(),
        };

        let out = render_article(&SiteConfig::default(), &article);
        assert!(out.starts_with("[draft]"));
        assert!(out.contains("Work in progress\nMarch 9, 2024\n\nSome <Component /> text\n"));
    }
}
