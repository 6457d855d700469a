//! Site author

use serde::{Deserialize, Serialize};

/// The person behind the site, configured under `author:` in `_config.yml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub bio: String,
    /// Avatar image URL
    pub avatar: String,
    pub social: Social,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            bio: "Full-stack developer who likes to write things down.".to_string(),
            avatar: "https://placehold.co/200x200?text=JD".to_string(),
            social: Social::default(),
        }
    }
}

/// Social links; any of them may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
