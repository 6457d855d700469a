//! Content module - handles posts and content processing

mod frontmatter;
mod markdown;
mod post;
pub mod repository;
pub mod search;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};
pub use repository::PostRepository;
pub use search::{search, SearchResults};
