//! Build-time data hooks for the two page kinds
//!
//! The index page receives every identifier; a content page receives the
//! rendered content of the identifier bound from its path segment.

use serde::Serialize;

use crate::content::{
    ContentError, ContentId, ContentLister, ContentResolver, FrontMatterParser, MarkdownTransform,
    RenderedContent,
};

/// Data for the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexProps {
    pub identifiers: Vec<ContentId>,
}

/// Collect the identifiers for the index page, sorted so that the page is
/// the same from one build to the next.
pub fn index_props(lister: &ContentLister) -> Result<IndexProps, ContentError> {
    let mut identifiers = lister.list()?;
    identifiers.sort();
    Ok(IndexProps { identifiers })
}

/// Resolve the data for one content page
pub fn page_props<P, M>(
    resolver: &ContentResolver<P, M>,
    id: &ContentId,
) -> Result<RenderedContent, ContentError>
where
    P: FrontMatterParser,
    M: MarkdownTransform,
{
    resolver.resolve(id)
}
