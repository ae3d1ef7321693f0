//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("public/css"))?;

    // Create default _config.yml
    let config_content = r#"# Site
title: My Site
description: ''
author: ''
language: en

# Directory
content_dir: content
posts_dir: posts
public_dir: public

# Server
host: localhost
port: 3000

# Date format for post listings (chrono strftime)
date_format: '%B %-d, %Y'
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Create starter pages
    let index_page = r#"# Welcome

This site is served straight from markdown files. Edit
`content/index.md` to change this page, or add more `.md` files under
`content/` to create new pages.
"#;

    let about_page = r#"# About

Tell your readers something about yourself here.
"#;

    fs::write(target_dir.join("content/index.md"), index_page)?;
    fs::write(target_dir.join("content/about.md"), about_page)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
---

Welcome to your new site! This is your very first post. Posts live under
`content/posts/` and start with a front-matter block holding at least a
`title` and a `date`.

Visit [/posts](/posts) to see the listing, or use the search box to find
posts by title or body text.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("content/posts/hello-world.md"), sample_post)?;

    // Minimal stylesheet referenced by the layout
    let stylesheet = r#"body {
  max-width: 42rem;
  margin: 0 auto;
  padding: 1rem;
  font-family: sans-serif;
  line-height: 1.6;
}

nav a {
  margin-right: 1rem;
}

nav form {
  display: inline;
}
"#;

    fs::write(target_dir.join("public/css/style.css"), stylesheet)?;

    Ok(())
}
