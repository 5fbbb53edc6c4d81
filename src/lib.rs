//! # phpref-base
//!
//! Import-aware type name resolution, override-aware hierarchy flattening
//! and signature rendering over PHP reflection data.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! tools    → Query surface (hierarchy, naming, export, documented types)
//!   ↓
//! hir      → Reflection descriptors, name resolution, flattening
//!   ↓
//! syntax   → Lexer + `namespace`/`use` extraction
//!   ↓
//! base     → Primitives (names, TextRange, LineIndex)
//! ```
//!
//! `project` sits beside `tools` and supplies filesystem source readers.

/// Foundation types: qualified-name helpers, spans, line index
pub mod base;

/// Token stream and import declarations of PHP source
pub mod syntax;

/// High-level IR: descriptors, import resolution, hierarchy flattening
pub mod hir;

/// Query surface over the HIR
pub mod tools;

/// Filesystem-backed source readers
pub mod project;

pub use base::{LineCol, LineIndex, TextRange, TextSize};
pub use hir::{
    AliasTable, ClassDescriptor, FunctionRef, ImportResolver, MethodDescriptor, Modifiers, PropertyDescriptor,
    ReflectionContext, ReflectionError, Result, class_hierarchy, class_methods, class_properties,
};
pub use project::FsSourceReader;
pub use tools::{ReflectionTools, ToolsOptions, TypeHintStrategy};
