//! Source unit access.
//!
//! Resolvers read the source of a class's declaring file exactly once, at
//! construction, through a [`SourceReader`]. [`FileSet`] is the in-memory
//! reader; the filesystem one lives in `project`.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::error::{ReflectionError, Result};

/// Reads the raw text of a source unit.
pub trait SourceReader {
    /// Fails with [`ReflectionError::Io`] when the unit cannot be read.
    fn read_source(&self, path: &Path) -> Result<Arc<str>>;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn read_source(&self, path: &Path) -> Result<Arc<str>> {
        (**self).read_source(path)
    }
}

/// In-memory source units keyed by path.
///
/// Useful for analysis sessions that already hold file contents, and for
/// tests. Safe to share between threads.
#[derive(Debug, Default)]
pub struct FileSet {
    contents: RwLock<IndexMap<PathBuf, Arc<str>>>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contents of a file, replacing any previous text.
    pub fn set_contents(&self, path: impl Into<PathBuf>, contents: impl Into<Arc<str>>) {
        self.contents.write().insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: &Path) -> Option<Arc<str>> {
        self.contents.read().get(path).cloned()
    }

    pub fn remove(&self, path: &Path) -> Option<Arc<str>> {
        self.contents.write().shift_remove(path)
    }

    pub fn len(&self) -> usize {
        self.contents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths in insertion order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.contents.read().keys().cloned().collect()
    }
}

impl SourceReader for FileSet {
    fn read_source(&self, path: &Path) -> Result<Arc<str>> {
        self.contents(path).ok_or_else(|| {
            ReflectionError::io(path, io::Error::new(io::ErrorKind::NotFound, "no such source unit"))
        })
    }
}
