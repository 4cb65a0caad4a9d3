//! Generator module - builds the static site from the content directory

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ContentId, ContentLister, ContentResolver};
use crate::pages::{self, IndexProps};
use crate::templates::{SiteData, TemplateRenderer};
use crate::Blog;

/// Static site generator
pub struct Generator {
    public_dir: PathBuf,
    lister: ContentLister,
    resolver: ContentResolver,
    renderer: TemplateRenderer,
    site: SiteData,
}

/// Outcome of a build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Identifiers whose pages were written
    pub pages: Vec<ContentId>,
    /// Identifiers whose pages failed, with the reason
    pub failures: Vec<PageFailure>,
}

#[derive(Debug)]
pub struct PageFailure {
    pub id: ContentId,
    pub error: anyhow::Error,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::with_overrides(Some(blog.template_dir.as_path()))?;

        Ok(Self {
            public_dir: blog.public_dir.clone(),
            lister: blog.lister(),
            resolver: blog.resolver(),
            renderer,
            site: SiteData::from_config(&blog.config),
        })
    }

    /// Generate the index page and one page per content file.
    ///
    /// A content directory that cannot be listed fails the whole build. A
    /// page that fails to resolve or render is recorded in the report and
    /// does not stop the others.
    pub fn generate(&self) -> Result<BuildReport> {
        fs::create_dir_all(&self.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.public_dir))?;

        let props = pages::index_props(&self.lister)?;
        tracing::info!("Found {} content files", props.identifiers.len());

        self.generate_index(&props)?;

        let results: Vec<(ContentId, Result<()>)> = props
            .identifiers
            .par_iter()
            .map(|id| (id.clone(), self.generate_page(id)))
            .collect();

        let mut report = BuildReport::default();
        for (id, result) in results {
            match result {
                Ok(()) => report.pages.push(id),
                Err(error) => {
                    tracing::error!("Failed to build page {}: {:#}", id, error);
                    report.failures.push(PageFailure { id, error });
                }
            }
        }

        Ok(report)
    }

    /// Generate public/index.html
    fn generate_index(&self, props: &IndexProps) -> Result<()> {
        let html = self.renderer.render_index(&self.site, props)?;
        write_page(&self.public_dir.join("index.html"), &html)
    }

    /// Generate public/<id>/index.html
    fn generate_page(&self, id: &ContentId) -> Result<()> {
        let page = pages::page_props(&self.resolver, id)?;
        let html = self.renderer.render_post(&self.site, id, &page)?;
        let output = self.public_dir.join(id.as_str()).join("index.html");
        write_page(&output, &html)?;
        tracing::debug!("Generated {:?}", output);
        Ok(())
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentError;

    fn blog_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_generate_site() {
        let (_dir, blog) = blog_with_posts(&[
            (
                "hello-world.mdx",
                "---\ntitle: Hello World\n---\n# Welcome\nThis is **bold**.\n",
            ),
            ("second.mdx", "---\ntitle: Second\n---\nMore.\n"),
            ("ignored.txt", "not content"),
        ]);

        let report = Generator::new(&blog).unwrap().generate().unwrap();
        assert!(report.is_success());
        assert_eq!(report.pages.len(), 2);

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains(r#"<a href="/hello-world">/hello-world</a>"#));
        assert!(index.contains(r#"<a href="/second">/second</a>"#));
        assert!(!index.contains("ignored"));

        let post = fs::read_to_string(blog.public_dir.join("hello-world/index.html")).unwrap();
        assert!(post.contains("<title>Hello World</title>"));
        assert!(post.contains("<h1>Welcome</h1>"));
        assert!(post.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_failed_page_does_not_stop_others() {
        let (_dir, blog) = blog_with_posts(&[
            ("good.mdx", "---\ntitle: Good\n---\nFine.\n"),
            ("untitled.mdx", "No front-matter at all.\n"),
        ]);

        let report = Generator::new(&blog).unwrap().generate().unwrap();
        assert!(!report.is_success());
        assert_eq!(report.pages, vec![ContentId::from("good")]);
        assert_eq!(report.failures.len(), 1);

        let failure = &report.failures[0];
        assert_eq!(failure.id.as_str(), "untitled");
        assert!(matches!(
            failure.error.downcast_ref::<ContentError>(),
            Some(ContentError::MissingRequiredMetadata { .. })
        ));

        assert!(blog.public_dir.join("good/index.html").is_file());
        assert!(!blog.public_dir.join("untitled").exists());
        // The index still links every listed identifier
        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("/untitled"));
    }

    #[test]
    fn test_missing_content_dir_fails_build() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let err = Generator::new(&blog).unwrap().generate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::DirectoryUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_content_dir() {
        let (_dir, blog) = blog_with_posts(&[]);
        let report = Generator::new(&blog).unwrap().generate().unwrap();
        assert!(report.is_success());
        assert!(report.pages.is_empty());
        assert!(blog.public_dir.join("index.html").is_file());
    }
}
