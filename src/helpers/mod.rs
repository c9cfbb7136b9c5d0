//! Formatting helpers shared by the listing output and the sitemap

mod date;
mod url;

pub use date::*;
pub use url::*;
