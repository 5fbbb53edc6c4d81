//! High-level IR: reflection descriptors and the analyses over them.
//!
//! ## Module Structure
//!
//! - [`reflect`] - class, member, function and type descriptors
//! - [`resolve`] - alias tables and import-aware name resolution
//! - [`hierarchy`] - override-aware flattening of class members
//! - [`source`] - reading source units
//! - [`ids`] - stable member and function identities
//! - [`error`] - error taxonomy

pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod reflect;
pub mod resolve;
pub mod source;

pub use error::{ContextKind, ReflectionError, Result};
pub use hierarchy::{class_hierarchy, class_methods, class_properties, filter_overrides};
pub use ids::{FunctionKey, MemberKey};
pub use reflect::{
    ArrayKey, ClassDescriptor, ClassMember, DefaultValue, FunctionDescriptor, FunctionRef, Literal,
    MethodDescriptor, Modifiers, NamedType, ParameterDescriptor, PropertyDescriptor, ReflectionContext,
    Signature, TypeDescriptor, Visibility,
};
pub use resolve::{AliasTable, ImportResolver, ResolutionContext};
pub use source::{FileSet, SourceReader};
