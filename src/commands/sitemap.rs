//! Write sitemap.xml

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Mode;
use crate::sitemap;
use crate::Site;

/// Default file name inside the public directory
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Build the sitemap and write it to `output`, `-` for stdout, or
/// `<public_dir>/sitemap.xml` when no output is given
pub fn run(site: &Site, mode: Mode, output: Option<&Path>) -> Result<Option<PathBuf>> {
    let articles = site.index()?.listing(mode)?;
    let entries = sitemap::entries(&site.config, &articles);
    let xml = sitemap::render(&entries);

    if output == Some(Path::new("-")) {
        print!("{}", xml);
        return Ok(None);
    }

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => site.public_dir.join(SITEMAP_FILE),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {:?}", parent))?;
    }
    fs::write(&path, xml).with_context(|| format!("failed to write {:?}", path))?;

    tracing::info!("Generated sitemap with {} URLs at {:?}", entries.len(), path);
    Ok(Some(path))
}
