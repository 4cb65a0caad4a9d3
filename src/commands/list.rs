//! List content identifiers

use anyhow::Result;

use crate::pages;
use crate::Blog;

/// Print the identifiers the index page would link, in index order
pub fn run(blog: &Blog, json: bool) -> Result<()> {
    println!("{}", render(blog, json)?);
    Ok(())
}

/// Format the index data as `/id` lines or as JSON
pub fn render(blog: &Blog, json: bool) -> Result<String> {
    let props = pages::index_props(&blog.lister())?;

    if json {
        return Ok(serde_json::to_string_pretty(&props)?);
    }

    let lines: Vec<String> = props
        .identifiers
        .iter()
        .map(|id| format!("/{}", id))
        .collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("posts/b.mdx"), "").unwrap();
        fs::write(dir.path().join("posts/a.mdx"), "").unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        assert_eq!(render(&blog, false).unwrap(), "/a\n/b");

        let json: serde_json::Value = serde_json::from_str(&render(&blog, true).unwrap()).unwrap();
        assert_eq!(json["identifiers"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_list_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(render(&blog, false).is_err());
    }
}
