//! Page templates using the Tera template engine
//!
//! The default templates are embedded in the binary. A file with the same
//! name in the blog's template directory replaces the embedded one.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};

use crate::config::BlogConfig;
use crate::content::{ContentId, RenderedContent};
use crate::pages::IndexProps;

pub const LAYOUT: &str = "layout.html";
pub const INDEX: &str = "index.html";
pub const POST: &str = "post.html";

const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    (LAYOUT, include_str!("default/layout.html")),
    (INDEX, include_str!("default/index.html")),
    (POST, include_str!("default/post.html")),
];

/// Template renderer for the index and content pages
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with the embedded templates only
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Create a renderer, letting files in `dir` replace embedded templates
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut templates = Vec::with_capacity(DEFAULT_TEMPLATES.len());
        for (name, embedded) in DEFAULT_TEMPLATES {
            let source = match dir.map(|d| d.join(name)).filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!("Using template override {:?}", path);
                    fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read template {:?}", path))?
                }
                None => embedded.to_string(),
            };
            templates.push((name, source));
        }

        let mut tera = Tera::default();

        // Rendered content is trusted HTML; templates escape titles and
        // identifiers themselves
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(templates)
            .context("Failed to load page templates")?;

        Ok(Self { tera })
    }

    /// Render the index page
    pub fn render_index(&self, site: &SiteData, props: &IndexProps) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("identifiers", &props.identifiers);
        self.render(INDEX, &context)
    }

    /// Render one content page
    pub fn render_post(
        &self,
        site: &SiteData,
        id: &ContentId,
        page: &RenderedContent,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("id", id);
        context.insert("page", page);
        self.render(POST, &context)
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .with_context(|| format!("Failed to render {}", template_name))
    }
}

/// Site-wide values available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub root: String,
}

impl SiteData {
    pub fn from_config(config: &BlogConfig) -> Self {
        let root = if config.root.ends_with('/') {
            config.root.clone()
        } else {
            format!("{}/", config.root)
        };
        Self {
            title: config.title.clone(),
            root,
        }
    }
}
