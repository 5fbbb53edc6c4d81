//! Reflection descriptors.
//!
//! These types stand in for the host's reflective introspection
//! primitives. They are plain data: an introspection layer (or a test)
//! builds them once and this crate only reads them.
//!
//! ## Key Types
//!
//! - [`ClassDescriptor`] - a class with its parent link, source file and
//!   the members a naive introspection call reports
//! - [`MethodDescriptor`], [`PropertyDescriptor`] - members, both exposing
//!   the [`ClassMember`] capability used by hierarchy flattening
//! - [`FunctionDescriptor`] - free functions and closures
//! - [`Signature`], [`ParameterDescriptor`], [`TypeDescriptor`],
//!   [`DefaultValue`] - what the signature formatter renders

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bitflags::bitflags;
use smol_str::SmolStr;

use super::error::ContextKind;
use super::ids::{FunctionKey, MemberKey};
use crate::base::{namespace_of, short_name};

// ============================================================================
// VISIBILITY & MODIFIERS
// ============================================================================

/// Member visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    fn modifier(self) -> Modifiers {
        match self {
            Visibility::Public => Modifiers::PUBLIC,
            Visibility::Protected => Modifiers::PROTECTED,
            Visibility::Private => Modifiers::PRIVATE,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Method modifiers, in the bit layout of the host's reflection API.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const ABSTRACT = 1 << 6;
    }
}

impl Modifiers {
    /// Modifier keywords in the order the host language writes them.
    pub fn names(self) -> Vec<&'static str> {
        const ORDER: [(Modifiers, &str); 6] = [
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::FINAL, "final"),
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::STATIC, "static"),
        ];

        ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|&(_, name)| name)
            .collect()
    }
}

// ============================================================================
// MEMBER CAPABILITY
// ============================================================================

/// What hierarchy flattening needs to know about a member.
///
/// Methods and properties share no base type; both implement this.
pub trait ClassMember {
    fn name(&self) -> &str;
    fn visibility(&self) -> Visibility;
    fn is_static(&self) -> bool;
    /// Fully-qualified name of the class whose body declares the member.
    fn declaring_class(&self) -> &str;

    fn is_private(&self) -> bool {
        self.visibility() == Visibility::Private
    }

    fn key(&self) -> MemberKey {
        MemberKey::new(self.declaring_class(), self.name())
    }
}

// ============================================================================
// TYPES
// ============================================================================

const BUILTIN_TYPES: &[&str] = &[
    "int", "float", "string", "bool", "array", "iterable", "callable", "object", "mixed",
    "void", "never", "null", "false", "true", "static",
];

const RELATIVE_TYPES: &[&str] = &["self", "parent"];

/// A single named type such as `int`, `?self` or `Foo\Bar`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedType {
    /// Type name as reported by introspection: builtins lowercase, classes
    /// fully qualified without a leading separator.
    pub name: SmolStr,
    /// Whether the declaration accepts null (`?T`, or `T $x = null`).
    pub nullable: bool,
}

impl NamedType {
    /// Scalar, aggregate and pseudo types, including `static`.
    pub fn is_builtin(&self) -> bool {
        BUILTIN_TYPES.iter().any(|b| self.name.eq_ignore_ascii_case(b))
    }

    /// `self` and `parent`, which name a class relative to the declaration.
    pub fn is_relative(&self) -> bool {
        RELATIVE_TYPES.iter().any(|b| self.name.eq_ignore_ascii_case(b))
    }

    /// Types that admit null without a `?` marker.
    pub fn is_implicitly_nullable(&self) -> bool {
        self.name.eq_ignore_ascii_case("mixed") || self.name.eq_ignore_ascii_case("null")
    }
}

/// A declared parameter, property or return type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDescriptor {
    Named(NamedType),
    Union(Vec<TypeDescriptor>),
    Intersection(Vec<TypeDescriptor>),
    /// A type shape the introspection layer could not map, e.g. a composite
    /// kind added by a newer host version. Carries the kind's name.
    Unknown(SmolStr),
}

impl TypeDescriptor {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self::Named(NamedType {
            name: name.into(),
            nullable: false,
        })
    }

    pub fn nullable(name: impl Into<SmolStr>) -> Self {
        Self::Named(NamedType {
            name: name.into(),
            nullable: true,
        })
    }

    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    pub fn intersection(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Intersection(members.into_iter().collect())
    }

    pub fn allows_null(&self) -> bool {
        match self {
            TypeDescriptor::Named(named) => named.nullable || named.is_implicitly_nullable(),
            TypeDescriptor::Union(members) => members.iter().any(TypeDescriptor::allows_null),
            TypeDescriptor::Intersection(_) | TypeDescriptor::Unknown(_) => false,
        }
    }
}

// ============================================================================
// DEFAULT VALUES
// ============================================================================

/// Key of an array literal entry.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

/// A compile-time literal value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered entries of an array literal.
    Array(Vec<(ArrayKey, Literal)>),
}

impl Literal {
    /// An array literal with sequential integer keys.
    pub fn list(items: impl IntoIterator<Item = Literal>) -> Self {
        Literal::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (ArrayKey::Int(i as i64), item))
                .collect(),
        )
    }

    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }
}

/// Default value of an optional parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum DefaultValue {
    /// Reference to a named constant, as introspection names it: `PHP_EOL`,
    /// `App\LIMIT`, `self::SIZE`.
    Constant(SmolStr),
    Literal(Literal),
}

// ============================================================================
// SIGNATURES
// ============================================================================

/// One parameter of a function or method.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDescriptor {
    pub name: SmolStr,
    pub ty: Option<TypeDescriptor>,
    pub by_reference: bool,
    pub variadic: bool,
    pub default: Option<DefaultValue>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            by_reference: false,
            variadic: false,
            default: None,
        }
    }

    pub fn typed(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn by_reference(mut self) -> Self {
        self.by_reference = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn allows_null(&self) -> bool {
        self.ty.as_ref().is_none_or(TypeDescriptor::allows_null)
    }
}

/// Parameters, return type and doc comment shared by functions and methods.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signature {
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: Option<TypeDescriptor>,
    pub returns_reference: bool,
    pub doc_comment: Option<String>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn returns_reference(mut self) -> Self {
        self.returns_reference = true;
        self
    }

    pub fn doc(mut self, comment: impl Into<String>) -> Self {
        self.doc_comment = Some(comment.into());
        self
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A method as reported by introspection.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDescriptor {
    pub name: SmolStr,
    pub declaring_class: Arc<str>,
    pub visibility: Visibility,
    /// `ABSTRACT`, `FINAL` and `STATIC`; visibility lives in `visibility`.
    pub flags: Modifiers,
    pub signature: Signature,
}

impl MethodDescriptor {
    pub fn new(declaring_class: impl Into<Arc<str>>, name: impl Into<SmolStr>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            declaring_class: declaring_class.into(),
            visibility,
            flags: Modifiers::empty(),
            signature: Signature::new(),
        }
    }

    pub fn with_flags(mut self, flags: Modifiers) -> Self {
        self.flags |= flags & (Modifiers::ABSTRACT | Modifiers::FINAL | Modifiers::STATIC);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// All modifiers, visibility included.
    pub fn modifiers(&self) -> Modifiers {
        self.flags | self.visibility.modifier()
    }
}

impl ClassMember for MethodDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn is_static(&self) -> bool {
        self.flags.contains(Modifiers::STATIC)
    }

    fn declaring_class(&self) -> &str {
        &self.declaring_class
    }
}

/// A property as reported by introspection.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    pub name: SmolStr,
    pub declaring_class: Arc<str>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub ty: Option<TypeDescriptor>,
    pub doc_comment: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(declaring_class: impl Into<Arc<str>>, name: impl Into<SmolStr>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            declaring_class: declaring_class.into(),
            visibility,
            is_static: false,
            ty: None,
            doc_comment: None,
        }
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn typed(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn doc(mut self, comment: impl Into<String>) -> Self {
        self.doc_comment = Some(comment.into());
        self
    }
}

impl ClassMember for PropertyDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn declaring_class(&self) -> &str {
        &self.declaring_class
    }
}

// ============================================================================
// CLASSES & FUNCTIONS
// ============================================================================

/// A class with its ancestor link.
///
/// `methods` and `properties` hold whatever the introspection primitive
/// reports for the class, which may include members inherited from
/// ancestors (their `declaring_class` names the ancestor).
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDescriptor {
    name: Arc<str>,
    parent: Option<Arc<ClassDescriptor>>,
    file_name: Option<PathBuf>,
    methods: Vec<MethodDescriptor>,
    properties: Vec<PropertyDescriptor>,
}

impl ClassDescriptor {
    /// A class with the given fully-qualified name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            file_name: None,
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: Arc<ClassDescriptor>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a method declared by this class.
    pub fn method(self, name: impl Into<SmolStr>, visibility: Visibility) -> Self {
        let method = MethodDescriptor::new(self.name.clone(), name, visibility);
        self.with_method(method)
    }

    /// Add a property declared by this class.
    pub fn property(self, name: impl Into<SmolStr>, visibility: Visibility) -> Self {
        let property = PropertyDescriptor::new(self.name.clone(), name, visibility);
        self.with_property(property)
    }

    /// Fully-qualified class name, without a leading separator.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    pub fn namespace(&self) -> &str {
        namespace_of(&self.name)
    }

    pub fn parent(&self) -> Option<&ClassDescriptor> {
        self.parent.as_deref()
    }

    /// Source file declaring the class; `None` for built-in classes.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Find this class or the ancestor with the given name.
    pub fn ancestor_or_self(&self, name: &str) -> Option<&ClassDescriptor> {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.name.eq_ignore_ascii_case(name) {
                return Some(class);
            }
            current = class.parent();
        }
        None
    }
}

/// A free function or closure.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDescriptor {
    /// Fully-qualified name; `{closure}` for closures.
    pub name: Arc<str>,
    pub is_closure: bool,
    pub signature: Signature,
}

impl FunctionDescriptor {
    pub const CLOSURE_NAME: &'static str = "{closure}";

    pub fn new(name: impl Into<Arc<str>>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            is_closure: false,
            signature,
        }
    }

    pub fn closure(signature: Signature) -> Self {
        Self {
            name: Arc::from(Self::CLOSURE_NAME),
            is_closure: true,
            signature,
        }
    }
}

/// Borrowed view over anything with a signature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FunctionRef<'a> {
    Function(&'a FunctionDescriptor),
    Method(&'a MethodDescriptor),
}

impl<'a> FunctionRef<'a> {
    pub fn signature(self) -> &'a Signature {
        match self {
            FunctionRef::Function(function) => &function.signature,
            FunctionRef::Method(method) => &method.signature,
        }
    }

    /// Name without namespace or class.
    pub fn short_name(self) -> &'a str {
        match self {
            FunctionRef::Function(function) => short_name(&function.name),
            FunctionRef::Method(method) => &method.name,
        }
    }

    pub fn doc_comment(self) -> Option<&'a str> {
        self.signature().doc_comment.as_deref()
    }

    pub fn is_closure(self) -> bool {
        matches!(self, FunctionRef::Function(function) if function.is_closure)
    }

    /// Stable identity; `None` for closures.
    pub fn key(self) -> Option<FunctionKey> {
        match self {
            FunctionRef::Function(function) if function.is_closure => None,
            FunctionRef::Function(function) => Some(FunctionKey::Function(function.name.clone())),
            FunctionRef::Method(method) => Some(FunctionKey::Method(method.key())),
        }
    }

    fn context_kind(self) -> ContextKind {
        match self {
            FunctionRef::Function(function) if function.is_closure => ContextKind::Closure,
            FunctionRef::Function(_) => ContextKind::Function,
            FunctionRef::Method(_) => ContextKind::Method,
        }
    }
}

impl<'a> From<&'a FunctionDescriptor> for FunctionRef<'a> {
    fn from(function: &'a FunctionDescriptor) -> Self {
        FunctionRef::Function(function)
    }
}

impl<'a> From<&'a MethodDescriptor> for FunctionRef<'a> {
    fn from(method: &'a MethodDescriptor) -> Self {
        FunctionRef::Method(method)
    }
}

// ============================================================================
// RESOLUTION CONTEXT
// ============================================================================

/// The declaration site a type name is written at.
///
/// Member and parameter contexts carry the class they were obtained from;
/// the declaring class is found by walking up from it.
#[derive(Clone, Copy, Debug)]
pub enum ReflectionContext<'a> {
    Class(&'a ClassDescriptor),
    ClassConstant {
        class: &'a ClassDescriptor,
        name: &'a str,
    },
    Property {
        class: &'a ClassDescriptor,
        property: &'a PropertyDescriptor,
    },
    Method {
        class: &'a ClassDescriptor,
        method: &'a MethodDescriptor,
    },
    Parameter {
        class: Option<&'a ClassDescriptor>,
        function: FunctionRef<'a>,
        parameter: &'a ParameterDescriptor,
    },
    Function(&'a FunctionDescriptor),
}

impl<'a> ReflectionContext<'a> {
    pub fn kind(&self) -> ContextKind {
        match self {
            ReflectionContext::Class(_) => ContextKind::Class,
            ReflectionContext::ClassConstant { .. } => ContextKind::ClassConstant,
            ReflectionContext::Property { .. } => ContextKind::Property,
            ReflectionContext::Method { .. } => ContextKind::Method,
            ReflectionContext::Parameter { .. } => ContextKind::Parameter,
            ReflectionContext::Function(function) => FunctionRef::Function(*function).context_kind(),
        }
    }

    /// The class whose source unit governs name resolution here.
    pub fn declaring_class(&self) -> Option<&'a ClassDescriptor> {
        match *self {
            ReflectionContext::Class(class) => Some(class),
            ReflectionContext::ClassConstant { class, .. } => Some(class),
            ReflectionContext::Property { class, property } => class.ancestor_or_self(&property.declaring_class),
            ReflectionContext::Method { class, method } => class.ancestor_or_self(&method.declaring_class),
            ReflectionContext::Parameter {
                class: Some(class),
                function: FunctionRef::Method(method),
                ..
            } => class.ancestor_or_self(&method.declaring_class),
            ReflectionContext::Parameter { .. } | ReflectionContext::Function(_) => None,
        }
    }
}
