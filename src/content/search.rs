//! Search over post summaries, as used by the command palette

use serde::Serialize;

use super::PostSummary;

/// How many related tags a search suggests
const RELATED_TAG_LIMIT: usize = 5;

/// Posts matching a query plus tags worth suggesting next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub posts: Vec<PostSummary>,
    pub related_tags: Vec<String>,
}

/// Case-insensitive substring match on title or any tag
///
/// A blank query matches every post.
pub fn search(posts: &[PostSummary], query: &str) -> SearchResults {
    let needle = query.trim().to_lowercase();

    let posts: Vec<PostSummary> = posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    let mut related_tags: Vec<String> = Vec::new();
    for tag in posts.iter().flat_map(|post| &post.tags) {
        if related_tags.len() == RELATED_TAG_LIMIT {
            break;
        }
        if !related_tags.contains(tag) {
            related_tags.push(tag.clone());
        }
    }

    SearchResults {
        posts,
        related_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, title: &str, tags: &[&str]) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: title.to_string(),
            description: String::new(),
            date: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn index() -> Vec<PostSummary> {
        vec![
            summary("async", "Async Rust in Practice", &["rust", "async"]),
            summary("vue", "Vue 3 Composition API", &["vue", "frontend"]),
            summary("nest", "Building APIs with NestJS", &["node", "backend", "TypeScript"]),
        ]
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let results = search(&index(), "RUST");
        assert_eq!(results.posts.len(), 1);
        assert_eq!(results.posts[0].slug, "async");
        assert_eq!(results.related_tags, vec!["rust", "async"]);
    }

    #[test]
    fn test_matches_tags() {
        let results = search(&index(), "typescript");
        assert_eq!(results.posts.len(), 1);
        assert_eq!(results.posts[0].slug, "nest");
    }

    #[test]
    fn test_blank_query_matches_all() {
        let results = search(&index(), "  ");
        assert_eq!(results.posts.len(), 3);
        assert_eq!(
            results.related_tags,
            vec!["rust", "async", "vue", "frontend", "node"]
        );
    }

    #[test]
    fn test_no_match() {
        let results = search(&index(), "haskell");
        assert!(results.posts.is_empty());
        assert!(results.related_tags.is_empty());
    }

    #[test]
    fn test_related_tags_are_distinct() {
        let posts = vec![
            summary("a", "One", &["x", "y"]),
            summary("b", "Two", &["y", "x", "z"]),
        ];
        assert_eq!(search(&posts, "").related_tags, vec!["x", "y", "z"]);
    }
}
