//! Parsed and rendered content documents

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Front-matter metadata, keyed by field name
pub type Metadata = BTreeMap<String, serde_yaml::Value>;

/// A source file split into its front-matter and markdown body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub metadata: Metadata,
    /// Raw markdown after the front-matter block
    pub body: String,
}

impl ParsedDocument {
    /// A document without front-matter: the whole text is the body
    pub fn body_only(body: impl Into<String>) -> Self {
        Self {
            metadata: Metadata::new(),
            body: body.into(),
        }
    }
}

/// What a content page template receives.
///
/// `html` comes straight from the markdown transform and is injected into the
/// page without escaping. Content files are assumed to be author-controlled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedContent {
    pub html: String,
    pub title: String,
}
