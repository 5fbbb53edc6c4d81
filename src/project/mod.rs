//! Filesystem access.
//!
//! `hir` only sees the [`SourceReader`](crate::hir::SourceReader) trait; this
//! module provides the implementation backed by the real filesystem and a
//! helper to preload files into a [`FileSet`](crate::hir::FileSet).

mod source_loader;

pub use source_loader::{FsSourceReader, load_file_into};
