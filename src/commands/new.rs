//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Folio;

/// Create a new post file with a front-matter scaffold
///
/// The file is named after `path` when given, otherwise after the slugified
/// title. Returns the path of the new file.
pub fn create_post(folio: &Folio, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    fs::create_dir_all(&folio.posts_dir)?;

    let name = match path {
        Some(p) => p.to_string(),
        None => slug::slugify(title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = folio
        .posts_dir
        .join(format!("{}.{}", name, folio.config.post_extension));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        title: title.to_string(),
        description: String::new(),
        date: now.format("%Y-%m-%d").to_string(),
        tags: Vec::new(),
    };
    let content = format!("---\n{}---\n", serde_yaml::to_string(&front_matter)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
