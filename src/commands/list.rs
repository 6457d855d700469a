//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = folio.posts().list_all()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.slug);
            }
        }
        "tag" | "tags" => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for post in folio.posts().list_all()? {
                for tag in post.tags {
                    *counts.entry(tag).or_default() += 1;
                }
            }
            println!("Tags ({}):", counts.len());
            for (tag, count) in counts {
                println!("  {} ({})", tag, count);
            }
        }
        "project" | "projects" => {
            let projects = folio.projects().list_all()?;
            println!("Projects ({}):", projects.len());
            for project in projects {
                let star = if project.featured { " *" } else { "" };
                println!("  {} [{}]{}", project.title, project.id, star);
            }
        }
        "featured" => {
            let projects = folio.projects().list_featured()?;
            println!("Featured projects ({}):", projects.len());
            for project in projects {
                println!("  {} [{}]", project.title, project.id);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, project, featured",
                content_type
            );
        }
    }

    Ok(())
}
