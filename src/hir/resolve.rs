//! Name resolution: resolving written type names to fully-qualified names.
//!
//! Resolution follows the rules PHP applies at compile time:
//!
//! 1. **Fully qualified** - a name starting with `\` is taken as written,
//!    minus the separator.
//! 2. **Imported** - otherwise the first segment is looked up,
//!    case-insensitively, among the `use` imports of the namespace block;
//!    on a hit the import target replaces that segment.
//! 3. **Namespace-relative** - otherwise the name is relative to the
//!    current namespace.
//!
//! ## Key Data Structures
//!
//! - [`AliasTable`] - lowercased short name → fully-qualified name
//! - [`ResolutionContext`] - namespace + alias table for one resolution task
//! - [`ImportResolver`] - query-time resolution against a context
//!
//! See <http://www.php.net/manual/en/language.namespaces.importing.php>.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::error::{ReflectionError, Result};
use super::reflect::ReflectionContext;
use super::source::SourceReader;
use crate::base::{first_segment, join_namespace, strip_leading_separator};
use crate::syntax::{ImportKind, ParsedImports, parse_imports};

// ============================================================================
// ALIAS TABLE
// ============================================================================

/// Class imports in effect in one namespace.
///
/// Keys are lowercase; values keep their original case. Built once, then
/// read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: FxHashMap<SmolStr, Arc<str>>,
}

impl AliasTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Class imports in effect for `class` (a short name) in `namespace`.
    ///
    /// Only the block chosen by [`ParsedImports::block_for`] contributes.
    /// Function and constant imports do not alias class names and are
    /// left out. A later import with the same alias replaces an earlier one.
    pub fn from_imports(imports: &ParsedImports, namespace: &str, class: Option<&str>) -> Self {
        let Some(block) = imports.block_for(namespace, class) else {
            return Self::new();
        };

        block
            .imports
            .iter()
            .filter(|import| import.kind == ImportKind::Class)
            .inspect(|import| {
                tracing::trace!(
                    alias = %import.alias,
                    target = %import.name,
                    at = %imports.line_col(import),
                    "class alias in effect"
                );
            })
            .map(|import| (import.alias.clone(), Arc::from(import.name.as_str())))
            .collect()
    }

    /// Look up the first segment of a name.
    pub fn lookup(&self, segment: &str) -> Option<&Arc<str>> {
        if segment.bytes().any(|b| b.is_ascii_uppercase()) {
            self.aliases.get(segment.to_ascii_lowercase().as_str())
        } else {
            self.aliases.get(segment)
        }
    }

    /// Iterate over `(lowercase alias, fully-qualified name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<Arc<str>>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let aliases = iter
            .into_iter()
            .map(|(alias, target)| (SmolStr::new(alias.as_ref().to_ascii_lowercase()), target.into()))
            .collect();
        Self { aliases }
    }
}

// ============================================================================
// RESOLUTION CONTEXT
// ============================================================================

/// The namespace and imports a name is resolved against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    namespace: Arc<str>,
    aliases: AliasTable,
}

impl ResolutionContext {
    pub fn new(namespace: &str, aliases: AliasTable) -> Self {
        let namespace = strip_leading_separator(namespace).unwrap_or(namespace);
        Self {
            namespace: Arc::from(namespace),
            aliases,
        }
    }

    /// The current namespace; empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves class names written at one declaration site.
///
/// Owns its [`ResolutionContext`]; resolution is pure, so a resolver can be
/// shared read-only between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportResolver {
    context: ResolutionContext,
}

impl ImportResolver {
    /// Build a resolver for the declaration site `context`.
    ///
    /// The declaring class is inferred from the context, its source file
    /// read through `reader`, and the imports of the class's namespace
    /// collected.
    ///
    /// # Errors
    ///
    /// [`ReflectionError::InvalidContext`] when the context has no declaring
    /// class (free functions, closures) or the class has no source file
    /// (built-in classes); [`ReflectionError::Io`] when the file cannot be
    /// read.
    pub fn new(context: ReflectionContext<'_>, reader: &dyn SourceReader) -> Result<Self> {
        let kind = context.kind();
        let class = context
            .declaring_class()
            .ok_or_else(|| ReflectionError::invalid_context("declaring class", kind))?;
        let file_name = class
            .file_name()
            .ok_or_else(|| ReflectionError::invalid_context("file name", kind))?;

        let source = reader.read_source(file_name)?;
        let imports = parse_imports(&source);
        let aliases = AliasTable::from_imports(&imports, class.namespace(), Some(class.short_name()));
        let resolver = Self::from_table(class.namespace(), aliases);

        tracing::debug!(
            class = class.name(),
            file = %file_name.display(),
            namespace = resolver.namespace(),
            aliases = resolver.aliases().len(),
            "built import resolver"
        );
        Ok(resolver)
    }

    /// Build a resolver from raw source text for the given namespace.
    ///
    /// Without a class to locate, the last block opening `namespace`
    /// supplies the imports.
    pub fn from_source(source: &str, namespace: &str) -> Self {
        let imports = parse_imports(source);
        Self::from_table(namespace, AliasTable::from_imports(&imports, namespace, None))
    }

    pub fn from_table(namespace: &str, aliases: AliasTable) -> Self {
        Self {
            context: ResolutionContext::new(namespace, aliases),
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    pub fn namespace(&self) -> &str {
        self.context.namespace()
    }

    pub fn aliases(&self) -> &AliasTable {
        self.context.aliases()
    }

    /// Resolve a class or interface name to its fully-qualified form.
    ///
    /// Never fails: a name that matches no import is taken to be relative
    /// to the current namespace, which for the global namespace gives a
    /// leading separator (`Foo` → `\Foo`).
    pub fn resolve(&self, name: &str) -> String {
        if let Some(qualified) = strip_leading_separator(name) {
            return qualified.to_string();
        }

        let (first, rest) = first_segment(name);
        if let Some(target) = self.aliases().lookup(first) {
            return format!("{target}{rest}");
        }

        join_namespace(self.namespace(), name)
    }
}
