//! Foundation types for the phpref toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - qualified-name helpers - splitting and joining `\`-separated names
//!
//! This module has NO dependencies on other phpref modules.

mod name;
mod span;

pub use name::{NS_SEPARATOR, first_segment, join_namespace, namespace_of, short_name, strip_leading_separator};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
