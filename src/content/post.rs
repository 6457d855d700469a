//! Post models

use serde::{Deserialize, Serialize};

use super::FrontMatter;
use crate::helpers::parse_date_string;

/// A rendered blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Slug (file stem of the source document)
    pub slug: String,

    /// Post title
    pub title: String,

    /// One-line summary
    pub description: String,

    /// Publication date as authored
    pub date: String,

    /// Post tags, in authored order
    pub tags: Vec<String>,

    /// Rendered HTML content
    pub content: String,
}

impl Post {
    /// Assemble a post from its parsed parts
    pub fn new(slug: impl Into<String>, front_matter: FrontMatter, content: String) -> Self {
        Self {
            slug: slug.into(),
            title: front_matter.title,
            description: front_matter.description,
            date: front_matter.date,
            tags: front_matter.tags,
            content,
        }
    }

    /// Whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Ordering key for the date; `None` when the date cannot be read
    pub fn sort_date(&self) -> Option<chrono::NaiveDateTime> {
        parse_date_string(&self.date)
    }
}

/// A post without its body, as served to listings and the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            slug: post.slug,
            title: post.title,
            description: post.description,
            date: post.date,
            tags: post.tags,
        }
    }
}
