//! Post repository - reads posts and pages from the content directory
//!
//! There is no cache and no shared mutable state: every call re-reads the
//! files it needs, so each request reflects the on-disk state at the moment
//! of the call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::post::title_from_slug;
use super::{FrontMatter, MarkdownRenderer, Page, Post, PostSummary};

/// Errors from content lookups
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found: {0}")]
    PostNotFound(String),

    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("failed to read posts directory {path:?}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads posts and standalone pages from disk
pub struct ContentStore {
    content_dir: PathBuf,
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentStore {
    /// Create a new store over a content directory and its posts
    /// subdirectory
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(content_dir: P, posts_dir: Q) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            posts_dir: posts_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// List all posts, newest first.
    ///
    /// Posts with a missing or unparsable date sort last; ties keep the
    /// underlying directory-listing order.
    pub fn list_posts(&self) -> Result<Vec<PostSummary>, StoreError> {
        let mut posts = Vec::new();

        for path in self.post_files()? {
            let content = fs::read_to_string(&path)?;
            let (fm, _body) = FrontMatter::parse(&content);
            let slug = slug_from_path(&path);
            posts.push(PostSummary {
                title: fm.title.unwrap_or_else(|| title_from_slug(&slug)),
                date: fm.date,
                slug,
            });
        }

        // Sort by date descending (newest first); stable, so ties keep
        // their listing order
        posts.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));

        Ok(posts)
    }

    /// Load a single post by slug, with rendered body
    pub fn get_post(&self, slug: &str) -> Result<Post, StoreError> {
        // Existence is checked first so a missing file maps to NotFound
        // instead of surfacing as a raw I/O error
        let path = markdown_path(&self.posts_dir, slug)
            .ok_or_else(|| StoreError::PostNotFound(slug.to_string()))?;
        self.load_post(&path)
    }

    /// Full-text search over titles and rendered bodies.
    ///
    /// Matching is a case-insensitive substring test; results come back in
    /// the same order as [`list_posts`](Self::list_posts).
    pub fn search(&self, query: &str) -> Result<Vec<Post>, StoreError> {
        let mut matches = Vec::new();

        for path in self.post_files()? {
            let post = self.load_post(&path)?;
            if post.matches(query) {
                matches.push(post);
            }
        }

        matches.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));

        Ok(matches)
    }

    /// Load a standalone top-level page by name
    pub fn get_page(&self, name: &str) -> Result<Page, StoreError> {
        let path = markdown_path(&self.content_dir, name)
            .ok_or_else(|| StoreError::PageNotFound(name.to_string()))?;
        let content = fs::read_to_string(&path)?;
        let (_fm, body) = FrontMatter::parse(&content);
        Ok(Page {
            name: name.to_string(),
            content: self.renderer.render(body),
        })
    }

    /// Enumerate markdown files in the posts directory, in listing order
    fn post_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.posts_dir).max_depth(1) {
            let entry = entry.map_err(|err| StoreError::DirectoryRead {
                path: self.posts_dir.clone(),
                source: err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk error")),
            })?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn load_post(&self, path: &Path) -> Result<Post, StoreError> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);
        let slug = slug_from_path(path);
        let title = fm.title.unwrap_or_else(|| title_from_slug(&slug));

        Ok(Post {
            title,
            date: fm.date,
            raw: body.to_string(),
            content: self.renderer.render(body),
            slug,
            source: path.to_path_buf(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Resolve `<dir>/<name>.md` (or `.markdown`), returning the first path
/// that exists
fn markdown_path(dir: &Path, name: &str) -> Option<PathBuf> {
    ["md", "markdown"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .find(|path| path.exists())
}

/// Slug is derived 1:1 from the filename without extension
fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join("posts").join(name), content).unwrap();
    }

    fn store(dir: &TempDir) -> ContentStore {
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        ContentStore::new(dir.path(), dir.path().join("posts"))
    }

    #[test]
    fn test_list_posts_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(&dir, "a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nbody a\n");
        write_post(&dir, "b.md", "---\ntitle: B\ndate: 2024-06-01\n---\nbody b\n");
        write_post(&dir, "c.md", "---\ntitle: C\ndate: 2023-12-31\n---\nbody c\n");

        let posts = store.list_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_list_posts_unparsable_date_sorts_last() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(&dir, "dated.md", "---\ntitle: Dated\ndate: 2020-01-01\n---\nx\n");
        write_post(&dir, "undated.md", "---\ntitle: Undated\ndate: whenever\n---\nx\n");

        let posts = store.list_posts().unwrap();
        assert_eq!(posts.last().unwrap().title, "Undated");
    }

    #[test]
    fn test_list_posts_ignores_non_markdown_files() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(&dir, "post.md", "---\ntitle: Post\ndate: 2024-01-01\n---\nx\n");
        write_post(&dir, "notes.txt", "not a post");

        let posts = store.list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Post");
    }

    #[test]
    fn test_list_posts_title_falls_back_to_filename() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(&dir, "my-first-post.md", "no front matter here\n");

        let posts = store.list_posts().unwrap();
        assert_eq!(posts[0].title, "my first post");
        assert_eq!(posts[0].slug, "my-first-post");
    }

    #[test]
    fn test_list_posts_missing_directory_is_distinct_error() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path(), dir.path().join("nonexistent"));

        let err = store.list_posts().unwrap_err();
        assert!(matches!(err, StoreError::DirectoryRead { .. }));
    }

    #[test]
    fn test_get_post_renders_body() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(
            &dir,
            "hello.md",
            "---\ntitle: Hello World\ndate: 2024-01-15\n---\n# Heading\n\nSome text.\n",
        );

        let post = store.get_post("hello").unwrap();
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.slug, "hello");
        assert!(post.content.contains("<h1>Heading</h1>"));
        assert!(post.raw.contains("# Heading"));
    }

    #[test]
    fn test_get_post_missing_returns_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.get_post("missing-slug").unwrap_err();
        assert!(matches!(err, StoreError::PostNotFound(slug) if slug == "missing-slug"));
    }

    #[test]
    fn test_get_post_keeps_body_after_horizontal_rule() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(
            &dir,
            "rules.md",
            "---\ntitle: Rules\ndate: 2024-01-01\n---\nbefore\n\n---\n\nafter\n",
        );

        let post = store.get_post("rules").unwrap();
        assert!(post.content.contains("before"));
        assert!(post.content.contains("after"));
        assert!(post.content.contains("<hr />"));
    }

    #[test]
    fn test_search_matches_title_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(
            &dir,
            "hello.md",
            "---\ntitle: Hello World\ndate: 2024-01-01\n---\ngreetings\n",
        );
        write_post(
            &dir,
            "other.md",
            "---\ntitle: Something Else\ndate: 2024-02-01\n---\nunrelated\n",
        );

        let results = store.search("hello").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Hello World");
    }

    #[test]
    fn test_search_matches_rendered_body() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(
            &dir,
            "post.md",
            "---\ntitle: Untouched\ndate: 2024-01-01\n---\na *special* word\n",
        );

        let results = store.search("special").unwrap();
        assert_eq!(results.len(), 1);
        // Rendered HTML is part of the searchable text
        let results = store.search("<em>special</em>").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_results_keep_listing_order() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(&dir, "old.md", "---\ntitle: Old match\ndate: 2023-01-01\n---\nx\n");
        write_post(&dir, "new.md", "---\ntitle: New match\ndate: 2024-01-01\n---\nx\n");

        let results = store.search("match").unwrap();
        let titles: Vec<_> = results.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New match", "Old match"]);
    }

    #[test]
    fn test_search_no_matches_returns_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        write_post(&dir, "post.md", "---\ntitle: Post\ndate: 2024-01-01\n---\nbody\n");

        let results = store.search("zzz-no-such-text").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_get_page() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(
            dir.path().join("about.md"),
            "---\ntitle: Ignored For Pages\n---\nAbout this site.\n",
        )
        .unwrap();

        let page = store.get_page("about").unwrap();
        assert_eq!(page.title(), "About");
        assert!(page.content.contains("About this site."));
        // Front-matter is stripped from the rendered page
        assert!(!page.content.contains("Ignored For Pages"));
    }

    #[test]
    fn test_get_page_missing_returns_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.get_page("missing").unwrap_err();
        assert!(matches!(err, StoreError::PageNotFound(name) if name == "missing"));
    }
}
