//! Content resolver - turns one content identifier into rendered content

use std::fs;
use std::io;
use std::path::PathBuf;

use super::{
    ContentError, ContentId, ContentSource, FencedFrontMatter, FrontMatterParser,
    MarkdownRenderer, MarkdownTransform, Metadata, ParsedDocument, RenderedContent,
};

const TITLE: &str = "title";

/// Resolves identifiers against a [`ContentSource`].
///
/// Stateless: every call reads the source file afresh, so resolving the same
/// unchanged file twice yields identical output.
pub struct ContentResolver<P = FencedFrontMatter, M = MarkdownRenderer> {
    source: ContentSource,
    parser: P,
    markdown: M,
}

impl ContentResolver {
    /// Resolver with the default front-matter parser and markdown renderer
    pub fn with_defaults(source: ContentSource) -> Self {
        Self::new(source, FencedFrontMatter, MarkdownRenderer::new())
    }
}

impl<P: FrontMatterParser, M: MarkdownTransform> ContentResolver<P, M> {
    pub fn new(source: ContentSource, parser: P, markdown: M) -> Self {
        Self {
            source,
            parser,
            markdown,
        }
    }

    /// Read an identifier's source file and split off its front-matter
    pub fn load(&self, id: &ContentId) -> Result<ParsedDocument, ContentError> {
        let path = self.locate(id)?;

        let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ContentError::SourceNotFound {
                id: id.clone(),
                path: path.clone(),
            },
            _ => ContentError::Unreadable {
                id: id.clone(),
                path: path.clone(),
                source,
            },
        })?;

        self.parser
            .parse(&raw)
            .map_err(|source| ContentError::MalformedFrontMatter {
                id: id.clone(),
                source,
            })
    }

    /// Resolve an identifier to the HTML and title of its page
    pub fn resolve(&self, id: &ContentId) -> Result<RenderedContent, ContentError> {
        let document = self.load(id)?;
        let html = self.markdown.render(&document.body);
        let title = required_title(id, &document.metadata)?;

        tracing::debug!("Resolved {} ({} bytes of HTML)", id, html.len());

        Ok(RenderedContent { html, title })
    }

    /// Find the single existing file for an identifier
    fn locate(&self, id: &ContentId) -> Result<PathBuf, ContentError> {
        if !id.is_file_name() {
            return Err(ContentError::SourceNotFound {
                id: id.clone(),
                path: self.source.dir.join(id.as_str()),
            });
        }

        let candidates = self.source.candidates(id);
        let mut existing: Vec<PathBuf> = candidates
            .iter()
            .filter(|p| p.is_file())
            .cloned()
            .collect();

        match existing.len() {
            0 => Err(ContentError::SourceNotFound {
                id: id.clone(),
                path: candidates
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| self.source.dir.join(id.as_str())),
            }),
            1 => Ok(existing.remove(0)),
            _ => Err(ContentError::DuplicateIdentifier {
                id: id.clone(),
                paths: existing,
            }),
        }
    }
}

/// Pull the page title out of the metadata
fn required_title(id: &ContentId, metadata: &Metadata) -> Result<String, ContentError> {
    use serde_yaml::Value;

    match metadata.get(TITLE) {
        None | Some(Value::Null) => Err(ContentError::MissingRequiredMetadata {
            id: id.clone(),
            field: TITLE,
        }),
        Some(Value::String(title)) => Ok(title.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(ContentError::InvalidMetadata {
            id: id.clone(),
            field: TITLE,
        }),
    }
}
