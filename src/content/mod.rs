//! Content module - lists content files and resolves them to rendered pages

mod document;
mod error;
mod frontmatter;
mod id;
pub mod lister;
mod markdown;
pub mod resolver;

pub use document::{Metadata, ParsedDocument, RenderedContent};
pub use error::ContentError;
pub use frontmatter::{FencedFrontMatter, FrontMatterError, FrontMatterParser};
pub use id::ContentId;
pub use lister::{ContentLister, ContentSource};
pub use markdown::{MarkdownRenderer, MarkdownTransform};
pub use resolver::ContentResolver;
