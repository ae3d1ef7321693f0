//! List site content

use anyhow::Result;

use crate::helpers::date::display_date;
use crate::Site;

/// Print all posts, newest first
pub fn run(site: &Site) -> Result<()> {
    let posts = site.store().list_posts()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            display_date(post.date.as_deref(), "%Y-%m-%d"),
            post.title,
            post.slug
        );
    }

    Ok(())
}
