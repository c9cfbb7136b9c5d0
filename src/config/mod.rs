//! Configuration module

mod site;

pub use site::ParsePolicy;
pub use site::SiteConfig;
