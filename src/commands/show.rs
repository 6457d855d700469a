//! Print a single rendered post

use anyhow::Result;

use crate::error::ContentError;
use crate::Folio;

/// Print the rendered HTML of one post
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    let post = folio
        .posts()
        .get_by_slug(slug)?
        .ok_or_else(|| ContentError::not_found("post", slug))?;

    println!("<!-- {} ({}) -->", post.title, post.date);
    println!("{}", post.content);

    Ok(())
}
