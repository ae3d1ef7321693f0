//! Post and Page models

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

use super::frontmatter;

/// A blog post
///
/// Posts are request-scoped projections: each one is constructed fresh from
/// disk by the [`ContentStore`](super::ContentStore) and dropped when the
/// response is done.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title, from front-matter or derived from the filename
    pub title: String,

    /// Raw `date:` value from front-matter; parsed lazily at sort and
    /// display time, never at parse time
    pub date: Option<String>,

    /// Raw markdown content with the front-matter header removed
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// URL identifier, the filename without extension
    pub slug: String,

    /// Full source file path
    pub source: PathBuf,
}

impl Post {
    /// Parse the publication date, if there is one and it is parsable
    pub fn parsed_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(frontmatter::parse_date_string)
    }

    /// URL path for this post
    pub fn url(&self) -> String {
        format!("/posts/{}", self.slug)
    }

    /// Case-insensitive substring match against the title or the rendered
    /// body. The rendered HTML is what gets searched, so tag markup is part
    /// of the searchable text.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
    }
}

/// A post listing entry without the body
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub date: Option<String>,
    pub slug: String,
}

impl PostSummary {
    /// Parse the publication date, if there is one and it is parsable
    pub fn parsed_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(frontmatter::parse_date_string)
    }

    /// URL path for this post
    pub fn url(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}

/// A standalone top-level page
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Page name, the filename without extension
    pub name: String,

    /// Rendered HTML content
    pub content: String,
}

impl Page {
    /// Display title: the page name with its first character capitalized
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// Derive a human-readable title from a slug by replacing word separators
/// with spaces.
pub fn title_from_slug(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, date: Option<&str>, content: &str) -> Post {
        Post {
            title: title.to_string(),
            date: date.map(str::to_string),
            raw: String::new(),
            content: content.to_string(),
            slug: "test".to_string(),
            source: PathBuf::from("test.md"),
        }
    }

    #[test]
    fn test_matches_title_case_insensitive() {
        let post = post("Hello World", None, "<p>nothing here</p>");
        assert!(post.matches("hello"));
        assert!(post.matches("WORLD"));
        assert!(!post.matches("absent"));
    }

    #[test]
    fn test_matches_rendered_content() {
        let post = post("untitled", None, "<p>some <em>rendered</em> body</p>");
        assert!(post.matches("rendered"));
        // HTML inserted by rendering is part of the searchable text
        assert!(post.matches("<em>"));
    }

    #[test]
    fn test_parsed_date_tolerates_garbage() {
        assert!(post("x", Some("not a date"), "").parsed_date().is_none());
        assert!(post("x", None, "").parsed_date().is_none());
        assert!(post("x", Some("2024-06-01"), "").parsed_date().is_some());
    }

    #[test]
    fn test_page_title_capitalizes_name() {
        let page = Page {
            name: "about".to_string(),
            content: String::new(),
        };
        assert_eq!(page.title(), "About");
    }

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("my-first-post"), "my first post");
        assert_eq!(title_from_slug("snake_case_name"), "snake case name");
        assert_eq!(title_from_slug("plain"), "plain");
    }
}
