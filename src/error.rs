//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the post repository and the project catalog
#[derive(Error, Debug)]
pub enum ContentError {
    /// A requested post or project does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// One document could not be parsed (front matter or body)
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The deployment is broken: missing directory, bad catalog file
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
