//! PHP source scanning.
//!
//! Only the slice of PHP syntax needed to build import tables is
//! recognised: namespace declarations and top-level `use` statements.

pub mod imports;
pub mod lexer;

pub use imports::{ImportKind, NamespaceBlock, ParsedImports, UseImport, parse_imports};
pub use lexer::{Token, TokenKind, tokenize};
