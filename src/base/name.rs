//! Qualified name primitives.
//!
//! PHP separates namespace segments with a backslash. A name that starts
//! with the separator is fully qualified; any other name is resolved
//! against the imports and namespace in effect where it is written.

/// The namespace qualifier separator.
pub const NS_SEPARATOR: char = '\\';

/// Split a name into its first segment and the remaining suffix.
///
/// The suffix keeps its leading separator so that it can be appended to a
/// resolved prefix verbatim: `"Foo\Bar\Baz"` → `("Foo", "\Bar\Baz")`.
pub fn first_segment(name: &str) -> (&str, &str) {
    match name.find(NS_SEPARATOR) {
        Some(pos) => name.split_at(pos),
        None => (name, ""),
    }
}

/// Strip exactly one leading separator, if present.
pub fn strip_leading_separator(name: &str) -> Option<&str> {
    name.strip_prefix(NS_SEPARATOR)
}

/// The namespace part of a fully-qualified class name.
///
/// Returns the empty string for classes in the global namespace.
pub fn namespace_of(fqcn: &str) -> &str {
    let fqcn = fqcn.strip_prefix(NS_SEPARATOR).unwrap_or(fqcn);
    match fqcn.rfind(NS_SEPARATOR) {
        Some(pos) => &fqcn[..pos],
        None => "",
    }
}

/// The last segment of a qualified name.
pub fn short_name(name: &str) -> &str {
    match name.rfind(NS_SEPARATOR) {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Join a namespace and a relative name.
///
/// The global namespace is the empty string, so a name joined to it keeps
/// a leading separator: `("", "Foo")` → `"\Foo"`.
pub fn join_namespace(namespace: &str, name: &str) -> String {
    format!("{namespace}{NS_SEPARATOR}{name}")
}
