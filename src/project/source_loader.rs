use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::hir::{FileSet, ReflectionError, Result, SourceReader};

/// Reads source units from disk.
///
/// Relative paths are taken relative to `root` when one is set, and to the
/// process working directory otherwise.
#[derive(Clone, Debug, Default)]
pub struct FsSourceReader {
    root: Option<PathBuf>,
}

impl FsSourceReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl SourceReader for FsSourceReader {
    fn read_source(&self, path: &Path) -> Result<Arc<str>> {
        let full_path = self.full_path(path);
        tracing::trace!(path = %full_path.display(), "reading source unit");
        fs::read_to_string(&full_path)
            .map(Arc::from)
            .map_err(|source| ReflectionError::io(full_path, source))
    }
}

/// Read a file from disk and store it in `files` under the same path.
pub fn load_file_into(path: impl Into<PathBuf>, files: &FileSet) -> Result<()> {
    let path = path.into();
    let contents = FsSourceReader::new().read_source(&path)?;
    files.set_contents(path, contents);
    Ok(())
}
