//! Post repository - reads posts from the posts directory on every query
//!
//! Nothing is cached: each call rescans the directory, rereads the files and
//! renders them again. Posts are few and change rarely, so the simplicity is
//! worth the repeated work.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post, PostSummary};
use crate::error::{ContentError, ContentResult};

/// Query interface over a directory of markdown posts
pub struct PostRepository {
    posts_dir: PathBuf,
    extension: String,
    renderer: MarkdownRenderer,
}

impl PostRepository {
    /// Create a repository over `posts_dir` reading `*.md` files
    pub fn new<P: Into<PathBuf>>(posts_dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            extension: "md".to_string(),
            renderer,
        }
    }

    /// Recognise a different document extension (without the dot)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Slugs of all posts, in file-name order
    pub fn list_slugs(&self) -> ContentResult<Vec<String>> {
        self.check_posts_dir()?;

        let slugs = WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.posts_dir, e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.slug_for(entry.path()))
            .collect();

        Ok(slugs)
    }

    /// Render one post; `Ok(None)` when no such post exists
    ///
    /// A missing posts directory is a configuration error, not a missing post.
    pub fn get_by_slug(&self, slug: &str) -> ContentResult<Option<Post>> {
        self.check_posts_dir()?;
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        let path = self.post_path(slug);
        if !path.is_file() {
            return Ok(None);
        }
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ContentError::parse(&path, "document is not valid UTF-8"));
            }
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        let (front_matter, body) =
            FrontMatter::parse(&raw).map_err(|e| ContentError::parse(&path, e))?;
        let content = self.renderer.render(body);

        tracing::debug!("Rendered post {} from {:?}", slug, path);
        Ok(Some(Post::new(slug, front_matter, content)))
    }

    /// All posts that render, newest first
    ///
    /// A post that fails to parse is logged and left out. Posts sharing a
    /// date keep file-name order; posts with an unreadable date come last.
    pub fn list_all(&self) -> ContentResult<Vec<Post>> {
        let slugs = self.list_slugs()?;
        let mut posts = Vec::with_capacity(slugs.len());

        for slug in &slugs {
            match self.get_by_slug(slug) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Post {} vanished while listing", slug),
                Err(e) => tracing::warn!("Skipping post {}: {}", slug, e),
            }
        }

        // Stable sort: equal dates keep enumeration order
        posts.sort_by_cached_key(|post| std::cmp::Reverse(post.sort_date()));

        Ok(posts)
    }

    /// Every tag in use, deduplicated and sorted
    pub fn list_tags(&self) -> ContentResult<Vec<String>> {
        let tags: BTreeSet<String> = self
            .list_all()?
            .into_iter()
            .flat_map(|post| post.tags)
            .collect();
        Ok(tags.into_iter().collect())
    }

    /// Posts carrying exactly `tag` (case-sensitive), newest first
    pub fn list_by_tag(&self, tag: &str) -> ContentResult<Vec<Post>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect())
    }

    /// `list_all` without post bodies
    pub fn list_summaries(&self) -> ContentResult<Vec<PostSummary>> {
        Ok(self
            .list_all()?
            .into_iter()
            .map(PostSummary::from)
            .collect())
    }

    fn check_posts_dir(&self) -> ContentResult<()> {
        if self.posts_dir.is_dir() {
            Ok(())
        } else {
            Err(ContentError::Configuration(format!(
                "posts directory not found: {}",
                self.posts_dir.display()
            )))
        }
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{}.{}", slug, self.extension))
    }

    fn slug_for(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let slug = path.file_stem()?.to_str()?;
        is_valid_slug(slug).then(|| slug.to_string())
    }
}

/// A slug names a file directly inside the posts directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn post(title: &str, date: &str, tags: &[&str]) -> String {
        format!(
            "---\ntitle: \"{}\"\ndescription: About {}\ndate: \"{}\"\ntags: [{}]\n---\n# {}\n\nBody of {}.\n",
            title,
            title,
            date,
            tags.join(", "),
            title,
            title
        )
    }

    fn fixture() -> (TempDir, PostRepository) {
        let dir = TempDir::new().unwrap();
        let posts = dir.path();
        write_post(posts, "alpha.md", &post("Alpha", "2024-01-01", &["rust", "intro"]));
        write_post(posts, "bravo.md", &post("Bravo", "2024-03-01", &["rust"]));
        write_post(posts, "charlie.md", &post("Charlie", "2024-01-01", &["Rust", "web"]));
        write_post(posts, "delta.md", &post("Delta", "", &["misc"]));
        write_post(posts, "notes.txt", "not a post");
        fs::create_dir(posts.join("drafts.md")).unwrap();
        write_post(posts, ".hidden.md", &post("Hidden", "2025-01-01", &["secret"]));

        let repo = PostRepository::new(posts, MarkdownRenderer::new());
        (dir, repo)
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_get_by_slug_example() {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "hello.md",
            "---\ntitle: \"Hello\"\ndate: \"2024-01-01\"\ntags: [\"intro\"]\n---\n# Hi\nworld",
        );
        let repo = PostRepository::new(dir.path(), MarkdownRenderer::new());

        let post = repo.get_by_slug("hello").unwrap().unwrap();
        assert_eq!(
            post,
            Post {
                slug: "hello".to_string(),
                title: "Hello".to_string(),
                description: String::new(),
                date: "2024-01-01".to_string(),
                tags: vec!["intro".to_string()],
                content: "<h1 id=\"hi\">Hi</h1>\n<p>world</p>".to_string(),
            }
        );
    }

    #[test]
    fn test_list_slugs_filters_and_orders() {
        let (_dir, repo) = fixture();
        assert_eq!(
            repo.list_slugs().unwrap(),
            vec!["alpha", "bravo", "charlie", "delta"]
        );
    }

    #[test]
    fn test_every_slug_resolves() {
        let (_dir, repo) = fixture();
        for slug in repo.list_slugs().unwrap() {
            assert!(repo.get_by_slug(&slug).unwrap().is_some(), "{}", slug);
        }
    }

    #[test]
    fn test_get_by_slug_not_found() {
        let (_dir, repo) = fixture();
        assert!(repo.get_by_slug("missing").unwrap().is_none());
        assert!(repo.get_by_slug("").unwrap().is_none());
        assert!(repo.get_by_slug("../alpha").unwrap().is_none());
        assert!(repo.get_by_slug(".hidden").unwrap().is_none());
    }

    #[test]
    fn test_directory_with_post_extension_is_not_a_post() {
        let (_dir, repo) = fixture();
        assert!(repo.posts_dir().join("drafts.md").is_dir());
        assert!(repo.get_by_slug("drafts").unwrap().is_none());
    }

    #[test]
    fn test_list_all_sorted_desc_and_stable() {
        let (_dir, repo) = fixture();
        let posts = repo.list_all().unwrap();
        assert_eq!(slugs(&posts), vec!["bravo", "alpha", "charlie", "delta"]);
    }

    #[test]
    fn test_list_all_skips_broken_posts() {
        let (dir, repo) = fixture();
        write_post(dir.path(), "broken.md", "---\ntitle: [oops\n---\nbody");
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let posts = repo.list_all().unwrap();
        assert_eq!(slugs(&posts), vec!["bravo", "alpha", "charlie", "delta"]);

        let err = repo.get_by_slug("broken").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
        let err = repo.get_by_slug("binary").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_missing_directory_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let repo = PostRepository::new(dir.path().join("nope"), MarkdownRenderer::new());
        assert!(matches!(
            repo.list_slugs(),
            Err(ContentError::Configuration(_))
        ));
        assert!(matches!(repo.list_all(), Err(ContentError::Configuration(_))));
        assert!(matches!(
            repo.get_by_slug("anything"),
            Err(ContentError::Configuration(_))
        ));
        assert!(matches!(
            repo.get_by_slug("../escape"),
            Err(ContentError::Configuration(_))
        ));
    }

    #[test]
    fn test_list_tags() {
        let (_dir, repo) = fixture();
        let tags = repo.list_tags().unwrap();
        assert_eq!(tags, vec!["Rust", "intro", "misc", "rust", "web"]);

        let posts = repo.list_all().unwrap();
        for tag in &tags {
            assert!(posts.iter().any(|p| p.has_tag(tag)));
        }
    }

    #[test]
    fn test_list_by_tag_exact_match() {
        let (_dir, repo) = fixture();
        let all = repo.list_all().unwrap();

        let rust = repo.list_by_tag("rust").unwrap();
        assert_eq!(slugs(&rust), vec!["bravo", "alpha"]);
        for post in &rust {
            assert!(post.tags.contains(&"rust".to_string()));
            assert!(all.contains(post));
        }

        assert_eq!(slugs(&repo.list_by_tag("Rust").unwrap()), vec!["charlie"]);
        assert!(repo.list_by_tag("ru").unwrap().is_empty());
        assert!(repo.list_by_tag("nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_list_summaries() {
        let (_dir, repo) = fixture();
        let summaries = repo.list_summaries().unwrap();
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0].slug, "bravo");
        assert_eq!(summaries[0].title, "Bravo");
        assert_eq!(summaries[0].description, "About Bravo");
        assert_eq!(summaries[0].tags, vec!["rust"]);
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let (_dir, repo) = fixture();
        assert_eq!(
            repo.get_by_slug("alpha").unwrap(),
            repo.get_by_slug("alpha").unwrap()
        );
    }

    #[test]
    fn test_no_caching_between_calls() {
        let (dir, repo) = fixture();
        assert_eq!(repo.get_by_slug("alpha").unwrap().unwrap().title, "Alpha");

        write_post(dir.path(), "alpha.md", &post("Alpha v2", "2024-01-01", &[]));
        assert_eq!(
            repo.get_by_slug("alpha").unwrap().unwrap().title,
            "Alpha v2"
        );

        write_post(dir.path(), "echo.md", &post("Echo", "2025-06-01", &[]));
        assert_eq!(repo.list_all().unwrap()[0].slug, "echo");
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "one.markdown", &post("One", "2024-01-01", &[]));
        write_post(dir.path(), "two.md", &post("Two", "2024-01-02", &[]));
        let repo =
            PostRepository::new(dir.path(), MarkdownRenderer::new()).with_extension(".markdown");

        assert_eq!(repo.list_slugs().unwrap(), vec!["one"]);
        assert!(repo.get_by_slug("two").unwrap().is_none());
    }

    #[test]
    fn test_post_without_front_matter() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "bare.md", "Just text");
        let repo = PostRepository::new(dir.path(), MarkdownRenderer::new());

        let post = repo.get_by_slug("bare").unwrap().unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.date, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "<p>Just text</p>");
    }
}
