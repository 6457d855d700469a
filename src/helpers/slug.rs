//! Heading anchor slugs

use std::collections::HashSet;

/// Turn heading text into an anchor id
///
/// Lowercases, keeps Unicode letters and digits, and collapses every other
/// run of characters into a single `-`.
///
/// # Examples
/// ```ignore
/// anchor_slug("Hello, World!")   // -> "hello-world"
/// anchor_slug("Rust 2024 版本")  // -> "rust-2024-版本"
/// ```
pub fn anchor_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

/// Hands out unique anchor ids within one document
#[derive(Debug, Default)]
pub struct AnchorSlugger {
    taken: HashSet<String>,
}

impl AnchorSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for a heading's text, suffixed `-1`, `-2`, ... on collision
    pub fn slug(&mut self, text: &str) -> String {
        let mut base = anchor_slug(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        self.claim(base)
    }

    /// Register an id the author set explicitly; returns the unique form
    pub fn claim(&mut self, id: String) -> String {
        if self.taken.insert(id.clone()) {
            return id;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", id, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_slug() {
        assert_eq!(anchor_slug("Hi"), "hi");
        assert_eq!(anchor_slug("Hello, World!"), "hello-world");
        assert_eq!(anchor_slug("  --Leading and trailing--  "), "leading-and-trailing");
        assert_eq!(anchor_slug("a   b\t\tc"), "a-b-c");
        assert_eq!(anchor_slug("Rust 2024 版本"), "rust-2024-版本");
        assert_eq!(anchor_slug("?!"), "");
    }

    #[test]
    fn test_slugger_disambiguates() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("Setup"), "setup-2");
        assert_eq!(slugger.slug("Other"), "other");
    }

    #[test]
    fn test_slugger_skips_literal_suffix() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.slug("Step 1"), "step-1");
        assert_eq!(slugger.slug("Step"), "step");
        assert_eq!(slugger.slug("Step"), "step-2");
    }

    #[test]
    fn test_slugger_empty_heading() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.slug("!!!"), "section");
        assert_eq!(slugger.slug(""), "section-1");
    }
}
