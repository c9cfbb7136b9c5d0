//! List articles, slugs and the latest posts

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::{listing, ArticleMeta, Mode, Order};
use crate::helpers::format_date;
use crate::Site;

/// Print the listing page's articles
pub fn run(site: &Site, mode: Mode, order: Order, json: bool) -> Result<()> {
    let mut articles = site.index()?.listing(mode)?;
    listing::sort_articles(&mut articles, order);

    tracing::info!("Listing {} articles ({:?})", articles.len(), mode);
    print_articles(&site.config, &articles, json)
}

/// Print the `count` most recent articles, as the home page shows them
pub fn latest(site: &Site, mode: Mode, count: Option<usize>, json: bool) -> Result<()> {
    let count = count.unwrap_or(site.config.latest_posts);
    let articles = site.index()?.latest(mode, count)?;
    print_articles(&site.config, &articles, json)
}

/// Print every slug, one per line
pub fn slugs(site: &Site) -> Result<()> {
    for slug in site.index()?.slugs()? {
        println!("{}", slug);
    }
    Ok(())
}

fn print_articles(config: &SiteConfig, articles: &[ArticleMeta], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(articles)?);
    } else {
        print!("{}", render_listing(config, articles));
    }
    Ok(())
}

/// Plain-text listing under the site title: date, title and excerpt per article
pub fn render_listing(config: &SiteConfig, articles: &[ArticleMeta]) -> String {
    let mut out = format!("{} | Thoughts ({}):\n", config.title, articles.len());
    for article in articles {
        out.push_str(&format!(
            "  {} - {} [{}]\n",
            format_date(&article.date, &config.date_format),
            article.display_title(),
            article.slug
        ));
        if let Some(excerpt) = article.excerpt.as_deref().filter(|e| !e.is_empty()) {
            out.push_str(&format!("      {}\n", excerpt));
        }
    }
    out
}
