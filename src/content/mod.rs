//! Content module - front matter, article records and the content index

mod article;
mod error;
mod frontmatter;
pub mod listing;
pub mod loader;

pub use article::{Article, ArticleMeta};
pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use listing::{Mode, Order};
pub use loader::ContentIndex;
