//! Portfolio module - projects and the site author

mod author;
pub mod catalog;
mod project;

pub use author::{Author, Social};
pub use catalog::ProjectCatalog;
pub use project::Project;
