//! Reflection tools: the query surface over the HIR.
//!
//! Everything here takes descriptors in and returns plain data out. The
//! only state is the per-function memo held by [`ReflectionTools`].
//!
//! ## Usage
//!
//! ```ignore
//! use phpref::tools::ReflectionTools;
//!
//! let tools = ReflectionTools::new();
//! for method in tools.class_methods(&class) {
//!     println!("{}", tools.export_function(method.into(), Modifiers::empty())?);
//! }
//! ```

mod cache;
mod doc_types;
mod export;
mod reflection;
mod signature;

pub use cache::ReflectionCache;
pub use doc_types::{ParameterTypes, parse_param_annotations, parse_var_annotation, structural_types};
pub use export::export_literal;
pub use reflection::{ReflectionTools, ToolsOptions, TypeHintStrategy};
pub use signature::{export_function, export_parameter, export_parameters, render_default, render_type};
