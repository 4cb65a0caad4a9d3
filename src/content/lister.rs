//! Content lister - enumerates content identifiers in the content directory

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, ContentId};

/// Where content lives: one directory and the file extensions recognized in it
#[derive(Debug, Clone)]
pub struct ContentSource {
    pub dir: PathBuf,
    /// Recognized extensions without the leading dot, in lookup order
    pub extensions: Vec<String>,
}

impl ContentSource {
    pub fn new<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Identifier for a file name, if it carries a recognized extension
    pub fn identify(&self, path: &Path) -> Option<ContentId> {
        let ext = path.extension()?.to_str()?;
        if !self.extensions.iter().any(|e| e == ext) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Some(ContentId::new(stem))
    }

    /// Paths an identifier could be stored at, one per recognized extension
    pub fn candidates(&self, id: &ContentId) -> Vec<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", id, ext)))
            .collect()
    }
}

/// Lists the content identifiers of a [`ContentSource`]
#[derive(Debug, Clone)]
pub struct ContentLister {
    source: ContentSource,
}

impl ContentLister {
    pub fn new(source: ContentSource) -> Self {
        Self { source }
    }

    /// List the identifiers of all recognized files directly inside the
    /// content directory. Order follows the directory listing and is not
    /// stable; sort if it matters.
    pub fn list(&self) -> Result<Vec<ContentId>, ContentError> {
        let dir = &self.source.dir;
        let unavailable = |source: io::Error| ContentError::DirectoryUnavailable {
            path: dir.clone(),
            source,
        };

        let metadata = fs::metadata(dir).map_err(unavailable)?;
        if !metadata.is_dir() {
            return Err(unavailable(io::Error::other("not a directory")));
        }

        let mut ids = Vec::new();
        let mut seen: HashMap<ContentId, Vec<PathBuf>> = HashMap::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself could not be read
                Err(e) if e.depth() == 0 => return Err(unavailable(e.into())),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(id) = self.source.identify(path) else {
                if path.file_name().and_then(|n| n.to_str()).is_none() {
                    tracing::warn!("Skipping non UTF-8 file name {:?}", path);
                }
                continue;
            };
            // The resolver only accepts single path components
            if !id.is_file_name() {
                tracing::warn!("Skipping {:?}: `{}` is not a usable identifier", path, id);
                continue;
            }

            tracing::debug!("Found {} at {:?}", id, path);
            let paths = seen.entry(id.clone()).or_default();
            if paths.is_empty() {
                ids.push(id);
            }
            paths.push(path.to_path_buf());
        }

        if let Some(id) = ids.iter().find(|id| seen[*id].len() > 1) {
            let mut paths = seen.remove(id).unwrap_or_default();
            paths.sort();
            return Err(ContentError::DuplicateIdentifier {
                id: id.clone(),
                paths,
            });
        }

        Ok(ids)
    }
}
