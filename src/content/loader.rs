//! Content index - reads articles from the content directory

use chrono_tz::Tz;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::listing::{self, Mode, Order};
use super::{Article, ArticleMeta, ContentError, FrontMatter};
use crate::config::ParsePolicy;

/// Stateless view over a directory of articles.
///
/// Every query goes back to the filesystem; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    content_dir: PathBuf,
    extensions: Vec<String>,
    policy: ParsePolicy,
    timezone: Tz,
}

impl ContentIndex {
    /// Create an index over `content_dir` reading files with the given extensions
    pub fn new<P: AsRef<Path>>(content_dir: P, extensions: &[&str]) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            policy: ParsePolicy::default(),
            timezone: chrono_tz::UTC,
        }
    }

    /// Set what happens to malformed files during a listing
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the timezone used for dates written without an offset
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Metadata of every article, newest first.
    ///
    /// Duplicate slugs and unreadable files always fail the call. Malformed
    /// front matter fails it too unless the index uses [`ParsePolicy::Skip`].
    pub fn list_articles(&self) -> Result<Vec<ArticleMeta>, ContentError> {
        let files = self.article_files()?;
        let mut articles = Vec::with_capacity(files.len());

        for (slug, path) in files {
            match self.load(&slug, &path) {
                Ok(article) => articles.push(article.meta),
                Err(e @ ContentError::Parse { .. }) if self.policy == ParsePolicy::Skip => {
                    tracing::warn!("Skipping article {:?}: {}", path, e);
                }
                Err(e) => return Err(e),
            }
        }

        listing::sort_articles(&mut articles, Order::NewestFirst);
        Ok(articles)
    }

    /// Full article for `slug`, body included
    pub fn get_article(&self, slug: &str) -> Result<Article, ContentError> {
        if !is_plain_slug(slug) {
            return Err(ContentError::NotFound {
                slug: slug.to_string(),
            });
        }

        let mut found: Option<PathBuf> = None;
        for ext in &self.extensions {
            let path = self.content_dir.join(format!("{}.{}", slug, ext));
            if !path.is_file() {
                continue;
            }
            if let Some(first) = found {
                return Err(ContentError::DuplicateSlug {
                    slug: slug.to_string(),
                    first,
                    second: path,
                });
            }
            found = Some(path);
        }

        match found {
            Some(path) => self.load(slug, &path),
            None => Err(ContentError::NotFound {
                slug: slug.to_string(),
            }),
        }
    }

    /// Every slug in the directory, without parsing any file
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        let mut slugs: Vec<String> = self
            .article_files()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    /// Articles a listing page shows in `mode`, newest first
    pub fn listing(&self, mode: Mode) -> Result<Vec<ArticleMeta>, ContentError> {
        let articles = self.list_articles()?;
        Ok(listing::visible(articles, mode))
    }

    /// The `count` most recent articles visible in `mode`
    pub fn latest(&self, mode: Mode, count: usize) -> Result<Vec<ArticleMeta>, ContentError> {
        let mut articles = self.listing(mode)?;
        articles.truncate(count);
        Ok(articles)
    }

    /// Read and parse one file into an article
    fn load(&self, slug: &str, path: &Path) -> Result<Article, ContentError> {
        let bytes = fs::read(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| ContentError::parse(path, e))?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::parse(path, e))?;
        let date = fm
            .parse_date(&self.timezone)
            .map_err(|e| ContentError::parse(path, e))?;

        // The filename decides the slug, whatever the front matter says
        let mut extra = fm.extra;
        extra.shift_remove("slug");

        tracing::debug!("Loaded article {:?} from {:?}", slug, path);

        Ok(Article {
            meta: ArticleMeta {
                slug: slug.to_string(),
                title: fm.title,
                date,
                excerpt: fm.excerpt,
                draft: fm.draft,
                source: path.to_path_buf(),
                extra,
            },
            body: body.to_string(),
        })
    }

    /// (slug, path) for every article file directly inside the content directory
    fn article_files(&self) -> Result<Vec<(String, PathBuf)>, ContentError> {
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself cannot be listed
                Err(e) if e.depth() == 0 => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.content_dir.clone());
                    return Err(ContentError::Read {
                        path,
                        source: e.into(),
                    });
                }
                Err(e) => {
                    // Only an entry that would be an article is worth failing for
                    let article_path = e
                        .path()
                        .filter(|p| self.slug_candidate(p).is_some())
                        .map(Path::to_path_buf);
                    match article_path {
                        Some(path) => {
                            return Err(ContentError::Read {
                                path,
                                source: e.into(),
                            });
                        }
                        None => {
                            tracing::debug!("Ignoring unreadable entry: {}", e);
                            continue;
                        }
                    }
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(slug) = self.slug_candidate(path) else {
                continue;
            };

            if let Some(first) = seen.get(&slug) {
                return Err(ContentError::DuplicateSlug {
                    slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }

            seen.insert(slug.clone(), path.to_path_buf());
            files.push((slug, path.to_path_buf()));
        }

        Ok(files)
    }

    /// Check if a file has one of the configured extensions
    fn is_article_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }

    /// Slug for `path` if it names an article `get_article` can find again.
    /// Hidden files (editor locks, backups) never qualify.
    fn slug_candidate(&self, path: &Path) -> Option<String> {
        if !self.is_article_file(path) {
            return None;
        }
        slug_for(path).filter(|slug| is_plain_slug(slug))
    }
}

/// Slug for a content file: its filename without the extension
pub fn slug_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A slug that can only name a file directly inside the content directory
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
}
