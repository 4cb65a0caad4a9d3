//! Errors raised while listing and resolving content

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::{ContentId, FrontMatterError};

/// Failure to list or resolve content.
///
/// Every variant names the identifier (or directory) it concerns so that a
/// failed build points at the offending file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory {path:?} is unavailable: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no source file for `{id}` (expected {path:?})")]
    SourceNotFound { id: ContentId, path: PathBuf },

    #[error("failed to read source file {path:?} for `{id}`: {source}")]
    Unreadable {
        id: ContentId,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed front-matter in `{id}`: {source}")]
    MalformedFrontMatter {
        id: ContentId,
        #[source]
        source: FrontMatterError,
    },

    #[error("`{id}` is missing required metadata field `{field}`")]
    MissingRequiredMetadata { id: ContentId, field: &'static str },

    #[error("`{id}` has invalid metadata field `{field}`: expected a string")]
    InvalidMetadata { id: ContentId, field: &'static str },

    #[error("identifier `{id}` matches more than one source file: {paths:?}")]
    DuplicateIdentifier { id: ContentId, paths: Vec<PathBuf> },
}
