//! Built-in layout templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; there is nothing to
//! load from disk at runtime.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded layout
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Disable autoescaping: the content binding is already-rendered
        // HTML and must pass through unescaped
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("builtin/layout.html")),
            ("posts.html", include_str!("builtin/posts.html")),
            ("search.html", include_str!("builtin/search.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render page content into the shared layout
    pub fn layout(&self, title: &str, content: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("content", content);
        Ok(self.tera.render("layout.html", &context)?)
    }

    /// Render the post listing fragment
    pub fn post_list(&self, posts: &[PostItem]) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", posts);
        Ok(self.tera.render("posts.html", &context)?)
    }

    /// Render the search results fragment
    pub fn search_results(&self, query: &str, posts: &[PostItem]) -> Result<String> {
        let mut context = Context::new();
        context.insert("query", query);
        context.insert("posts", posts);
        Ok(self.tera.render("search.html", &context)?)
    }
}

/// Listing row passed to the posts and search templates
#[derive(Debug, Clone, Serialize)]
pub struct PostItem {
    pub title: String,
    pub date: String,
    pub url: String,
}
