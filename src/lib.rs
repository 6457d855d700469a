//! folio-rs: a personal blog and portfolio backend
//!
//! Posts are markdown files with front matter, rendered to HTML with heading
//! anchors and highlighted code. Projects come from a JSON file. Both are
//! reread on every query and exposed through a small JSON API and a CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod portfolio;
pub mod server;

use anyhow::Result;
use std::path::Path;

pub use error::{ContentError, ContentResult};

/// The main Folio application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: std::path::PathBuf,
    /// The projects JSON file
    pub projects_file: std::path::PathBuf,
    /// Static files served next to the API
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let projects_file = base_dir.join(&config.projects_file);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            projects_file,
            public_dir,
        }
    }

    /// Post repository over the configured posts directory
    pub fn posts(&self) -> content::PostRepository {
        let renderer = content::MarkdownRenderer::from_config(&self.config);
        content::PostRepository::new(&self.posts_dir, renderer)
            .with_extension(&self.config.post_extension)
    }

    /// Project catalog over the configured projects file
    pub fn projects(&self) -> portfolio::ProjectCatalog {
        portfolio::ProjectCatalog::new(&self.projects_file)
    }

    /// The site author
    pub fn author(&self) -> &portfolio::Author {
        &self.config.author
    }
}
