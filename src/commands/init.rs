//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
title: Folio
description: ''
url: http://example.com

# Content
posts_dir: content/posts
post_extension: md
projects_file: content/projects.json
public_dir: public

# Rendering
markdown:
  allow_raw_html: true
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# About
author:
  name: John Doe
  bio: ''
  avatar: ''
  social:
    github: https://github.com/
"#;

const PROJECTS_TEMPLATE: &str = r#"[
  {
    "id": "folio",
    "title": "Folio",
    "description": "The engine behind this site.",
    "thumbnail": "",
    "demoUrl": "",
    "githubUrl": "",
    "tags": ["rust"],
    "featured": true
  }
]
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("public"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;
    write_if_missing(&target_dir.join("content/projects.json"), PROJECTS_TEMPLATE)?;

    // Create a sample post
    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
description: The first post on this site.
date: "{}"
tags: [intro]
---

Welcome! This is your very first post.

## Quick Start

### Create a new post

```bash
$ folio new "My New Post"
```

### Run server

```bash
$ folio server
```
"#,
        today
    );
    write_if_missing(&target_dir.join("content/posts/hello-world.md"), &sample_post)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
