//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: Folio
description: ''
author: John Doe
author_url: ''
email: ''
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: data
category: posts
public_dir: public
tag_dir: tags
static_dir: static

# Listing
max_display: 10
posts_per_page: 10

# Footer links, empty entries are hidden
social:
  linkedin: ''
  upwork: ''
  github: ''
  facebook: ''
  instagram: ''
  youtube: ''

# Table of contents
toc:
  offset: 100
  max_depth: 3

highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
summary:
tags:
---
"#;

/// Create the directory layout, a default config and a sample post
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!("{} already exists in {:?}", CONFIG_FILE, target_dir);
    }

    fs::create_dir_all(target_dir.join("data/posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;
    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
summary: The first post on this site.
tags: [welcome]
---

Welcome! This post lives in `data/posts/hello-world.md`.

## Writing

Create a post with:

```bash
$ folio new "My New Post"
```

## Previewing

```bash
$ folio server --open
```

## Publishing

```bash
$ folio generate
```

The site is written to `public/`.
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("data/posts/hello-world.md"), sample_post)?;
    tracing::debug!("Scaffolded site in {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Folio;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Folio");
        assert_eq!(folio.config.toc.offset, 100.0);

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
        assert_eq!(posts[0].tags, vec!["welcome"]);
        assert_eq!(posts[0].toc.len(), 3);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
