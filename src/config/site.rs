//! Blog configuration (_config.yml)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    /// URL prefix for links between pages
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    /// Directory holding template overrides
    pub template_dir: String,

    /// Recognized content file extensions, without the leading dot
    pub extensions: Vec<String>,

    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            root: "/".to_string(),

            content_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            template_dir: "layout".to_string(),

            extensions: vec!["mdx".to_string()],

            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            bail!("`extensions` must list at least one content file extension");
        }
        for ext in &self.extensions {
            if ext.is_empty() || ext.contains(['.', '/', '\\']) {
                bail!(
                    "Invalid content extension {:?}: expected a bare extension such as \"mdx\"",
                    ext
                );
            }
        }
        Ok(())
    }
}

/// Markdown extension toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Tables, strikethrough and task lists
    pub gfm: bool,
    pub footnotes: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            footnotes: false,
            smart_punctuation: false,
        }
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.extensions, vec!["mdx"]);
        assert!(config.markdown.gfm);
        assert!(config.highlight.enable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
content_dir: content
extensions: [md, markdown]
highlight:
  line_number: true
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.extensions, vec!["md", "markdown"]);
        assert!(config.highlight.line_number);
        // Untouched keys keep their defaults
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_validate_rejects_bad_extensions() {
        let mut config = BlogConfig {
            extensions: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.extensions = vec![".mdx".to_string()];
        assert!(config.validate().is_err());

        config.extensions = vec!["mdx".to_string(), String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Notes\nextensions: []\n").unwrap();
        assert!(BlogConfig::load(&path).is_err());

        fs::write(&path, "title: Notes\n").unwrap();
        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.title, "Notes");
    }
}
