//! Errors surfaced by the content index

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or interpreting the content directory
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no article with slug {slug:?}")]
    NotFound { slug: String },

    #[error("slug {slug:?} is claimed by both {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ContentError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error means "nothing to show" rather than a broken site
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
