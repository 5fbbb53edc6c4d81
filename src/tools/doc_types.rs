//! Types documented in doc comments.
//!
//! Only the two annotations the tools need are recognized, `@param` and
//! `@var`, and their type is split on `|` without further parsing.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use smol_str::SmolStr;

use crate::hir::{NamedType, TypeDescriptor};

use super::signature::qualify;

static PARAM_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@param\s+(\S+)\s+\$(\S+)").expect("valid @param pattern"));

static VAR_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@var\s+(\S+)").expect("valid @var pattern"));

/// Documented types, keyed by parameter name in annotation order.
pub type ParameterTypes = IndexMap<SmolStr, Vec<SmolStr>>;

/// Collect every `@param <types> $<name>` annotation of a doc comment.
///
/// Parameter names are not checked against the signature. When a name is
/// documented twice, the last annotation wins.
pub fn parse_param_annotations(doc_comment: &str) -> ParameterTypes {
    PARAM_ANNOTATION
        .captures_iter(doc_comment)
        .map(|captures| (SmolStr::new(&captures[2]), split_types(&captures[1])))
        .collect()
}

/// Types of the first `@var` annotation, or an empty list.
pub fn parse_var_annotation(doc_comment: &str) -> Vec<SmolStr> {
    VAR_ANNOTATION
        .captures(doc_comment)
        .map(|captures| split_types(&captures[1]))
        .unwrap_or_default()
}

fn split_types(types: &str) -> Vec<SmolStr> {
    types.split('|').map(SmolStr::new).collect()
}

/// The names a structural type reports, in the same shape as annotations:
/// classes qualified, `null` appended when the type accepts it.
///
/// `None` for intersections and unknown kinds, which have no flat form.
pub fn structural_types(ty: &TypeDescriptor) -> Option<Vec<SmolStr>> {
    let mut types = match ty {
        TypeDescriptor::Named(named) => vec![flat_name(named)],
        TypeDescriptor::Union(members) => members
            .iter()
            .map(|member| match member {
                TypeDescriptor::Named(named) => Some(flat_name(named)),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?,
        TypeDescriptor::Intersection(_) | TypeDescriptor::Unknown(_) => return None,
    };

    if ty.allows_null() && !types.iter().any(|t| t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("mixed")) {
        types.push(SmolStr::new_static("null"));
    }
    Some(types)
}

fn flat_name(named: &NamedType) -> SmolStr {
    SmolStr::new(qualify(named))
}
