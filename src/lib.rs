//! postpress: a minimal static blog generator
//!
//! Lists the markdown files of a content directory, splits each into
//! front-matter and body, renders the body to HTML and writes an index page
//! plus one page per file.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod pages;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLister, ContentResolver, ContentSource, FencedFrontMatter, MarkdownRenderer};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (markdown) directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Template override directory
    pub template_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let template_dir = base_dir.join(&config.template_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            template_dir,
        }
    }

    /// The content directory and its recognized extensions
    pub fn content_source(&self) -> ContentSource {
        ContentSource {
            dir: self.content_dir.clone(),
            extensions: self.config.extensions.clone(),
        }
    }

    pub fn lister(&self) -> ContentLister {
        ContentLister::new(self.content_source())
    }

    pub fn resolver(&self) -> ContentResolver {
        let markdown =
            MarkdownRenderer::with_config(&self.config.markdown, &self.config.highlight);
        ContentResolver::new(self.content_source(), FencedFrontMatter, markdown)
    }

    /// Build the static site
    pub fn build(&self) -> Result<generator::BuildReport> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
