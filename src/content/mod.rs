//! Content module - posts, pages, and front-matter handling

mod frontmatter;
mod markdown;
mod post;
mod store;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{Page, Post, PostSummary};
pub use store::{ContentStore, StoreError};
