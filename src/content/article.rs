//! Article models

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

use crate::helpers::date_json;

fn serialize_date<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date_json(date))
}

/// Listing record for an article: everything but the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleMeta {
    /// Routing key, the filename without its extension
    pub slug: String,

    pub title: String,

    /// Publication date
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,

    pub excerpt: Option<String>,

    /// Hidden from public listings outside development mode
    pub draft: bool,

    /// Source file the record was read from
    #[serde(skip)]
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl ArticleMeta {
    /// Title as shown in listings; drafts carry a trailing marker
    pub fn display_title(&self) -> String {
        if self.draft {
            format!("{} *", self.title)
        } else {
            self.title.clone()
        }
    }
}

/// A full article: metadata plus the raw markup body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    #[serde(rename = "metadata")]
    pub meta: ArticleMeta,
    pub body: String,
}
