//! Project catalog - the projects JSON file, reread on every query

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::Project;
use crate::error::{ContentError, ContentResult};

/// Read-only view over the projects file
pub struct ProjectCatalog {
    path: PathBuf,
}

impl ProjectCatalog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every project, in file order
    ///
    /// A missing or malformed file, or two projects sharing an id, means
    /// the site is misconfigured and is reported as such.
    pub fn list_all(&self) -> ContentResult<Vec<Project>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            ContentError::Configuration(format!(
                "cannot read projects file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let projects: Vec<Project> = serde_json::from_str(&content).map_err(|e| {
            ContentError::Configuration(format!(
                "malformed projects file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut seen = HashSet::new();
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(ContentError::Configuration(format!(
                    "duplicate project id {:?} in {}",
                    project.id,
                    self.path.display()
                )));
            }
        }

        tracing::debug!("Loaded {} projects from {:?}", projects.len(), self.path);
        Ok(projects)
    }

    /// Projects flagged `featured`, in file order
    pub fn list_featured(&self) -> ContentResult<Vec<Project>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|project| project.featured)
            .collect())
    }

    /// The project with this id; `Ok(None)` when there is none
    pub fn find_by_id(&self, id: &str) -> ContentResult<Option<Project>> {
        Ok(self
            .list_all()?
            .into_iter()
            .find(|project| project.id == id))
    }
}
