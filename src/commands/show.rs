//! Resolve and print a single content page

use anyhow::Result;

use crate::content::ContentId;
use crate::pages;
use crate::Blog;

/// Print the resolved title and HTML of one identifier
pub fn run(blog: &Blog, id: &str, json: bool) -> Result<()> {
    println!("{}", render(blog, id, json)?);
    Ok(())
}

pub fn render(blog: &Blog, id: &str, json: bool) -> Result<String> {
    let id = ContentId::from(id);
    let page = pages::page_props(&blog.resolver(), &id)?;

    if json {
        return Ok(serde_json::to_string_pretty(&page)?);
    }
    Ok(format!("# {}\n\n{}", page.title, page.html.trim_end()))
}
