//! Portfolio project model

use serde::{Deserialize, Serialize};

/// A portfolio entry from the projects file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique id within the catalog
    pub id: String,

    pub title: String,

    pub description: String,

    /// Image reference for the project card
    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub demo_url: String,

    #[serde(default)]
    pub github_url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Shown on the home page
    #[serde(default)]
    pub featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_keys() {
        let json = r#"{
            "id": "blog",
            "title": "Blog",
            "description": "This site",
            "thumbnail": "/img/blog.png",
            "demoUrl": "https://example.com",
            "githubUrl": "https://github.com/me/blog",
            "tags": ["rust"],
            "featured": true
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.demo_url, "https://example.com");
        assert_eq!(project.github_url, "https://github.com/me/blog");
        assert!(project.featured);

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["demoUrl"], "https://example.com");
        assert_eq!(back["githubUrl"], "https://github.com/me/blog");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"id": "x", "title": "X", "description": ""}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.thumbnail, "");
        assert!(project.tags.is_empty());
        assert!(!project.featured);
    }

    #[test]
    fn test_required_fields() {
        let json = r#"{"title": "No id", "description": ""}"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }
}
