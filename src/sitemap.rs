//! sitemap.xml for the home page, the listing page and every visible article

use crate::config::SiteConfig;
use crate::content::ArticleMeta;
use crate::helpers::{article_url, date_w3c, full_url_for, listing_url};

/// Change frequency values for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(&self) -> &str {
        match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

/// A single URL entry in the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitemapEntry {
    fn to_xml(&self) -> String {
        let mut xml = String::from("<url>");
        xml.push_str(&format!("<loc>{}</loc>", escape_xml(&self.loc)));

        if let Some(ref lastmod) = self.lastmod {
            xml.push_str(&format!("<lastmod>{}</lastmod>", lastmod));
        }

        xml.push_str(&format!("<changefreq>{}</changefreq>", self.changefreq.as_str()));
        xml.push_str(&format!("<priority>{:.1}</priority>", self.priority));
        xml.push_str("</url>");
        xml
    }
}

/// Entries for `articles`, which should already be filtered and ordered.
///
/// The home and listing pages take their `lastmod` from the newest article.
pub fn entries(config: &SiteConfig, articles: &[ArticleMeta]) -> Vec<SitemapEntry> {
    let newest = articles.iter().map(|a| a.date).max().map(|d| date_w3c(&d));

    let mut entries = vec![
        SitemapEntry {
            loc: full_url_for(config, "/"),
            lastmod: newest.clone(),
            changefreq: ChangeFreq::Weekly,
            priority: 1.0,
        },
        SitemapEntry {
            loc: full_url_for(config, &listing_url(config)),
            lastmod: newest,
            changefreq: ChangeFreq::Weekly,
            priority: 0.9,
        },
    ];

    entries.extend(articles.iter().map(|article| SitemapEntry {
        loc: full_url_for(config, &article_url(config, &article.slug)),
        lastmod: Some(date_w3c(&article.date)),
        changefreq: ChangeFreq::Monthly,
        priority: 0.8,
    }));

    entries
}

/// Render a complete `urlset` document
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        xml.push_str(&entry.to_xml());
        xml.push('\n');
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escapes XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
