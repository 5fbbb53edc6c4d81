//! Hierarchy flattening: the effective instance members of a class.
//!
//! Like the host's own member listing, the flattened view:
//!
//! - returns only the overriding member when a protected or public member
//!   is redeclared in a subclass;
//! - keeps members of one class in declaration order.
//!
//! Unlike it, the flattened view:
//!
//! - includes private members of every ancestor;
//! - lists members in hierarchical order, ancestors first;
//! - never includes static members.

use rustc_hash::FxHashMap;

use super::reflect::{ClassDescriptor, ClassMember, MethodDescriptor, PropertyDescriptor};

/// The ancestor chain of `class`, root first and `class` itself last.
pub fn class_hierarchy(class: &ClassDescriptor) -> Vec<&ClassDescriptor> {
    let mut classes: Vec<&ClassDescriptor> = std::iter::successors(Some(class), |c| c.parent()).collect();
    classes.reverse();
    classes
}

/// Non-static methods that make up an instance of `class`.
pub fn class_methods(class: &ClassDescriptor) -> Vec<&MethodDescriptor> {
    filter_overrides(collect_own_members(class, ClassDescriptor::methods))
}

/// Non-static properties that make up an instance of `class`.
pub fn class_properties(class: &ClassDescriptor) -> Vec<&PropertyDescriptor> {
    filter_overrides(collect_own_members(class, ClassDescriptor::properties))
}

/// Walk the hierarchy root to leaf and take each class's own non-static
/// members, skipping entries the class merely inherits.
fn collect_own_members<'a, T, F>(class: &'a ClassDescriptor, members: F) -> Vec<&'a T>
where
    T: ClassMember,
    F: Fn(&'a ClassDescriptor) -> &'a [T],
{
    class_hierarchy(class)
        .into_iter()
        .flat_map(|level| {
            members(level)
                .iter()
                .filter(move |m| !m.is_static() && m.declaring_class() == level.name())
        })
        .collect()
}

/// Drop members overridden further down the hierarchy, keeping order.
///
/// A non-private member is overridden when a later entry carries the same
/// name. Private members cannot be overridden and are always kept.
pub fn filter_overrides<T: ClassMember>(members: Vec<&T>) -> Vec<&T> {
    let mut last_index: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, member) in members.iter().enumerate() {
        last_index.insert(member.name(), index);
    }

    members
        .iter()
        .enumerate()
        .filter(|&(index, member)| {
            if member.is_private() || last_index.get(member.name()) == Some(&index) {
                return true;
            }
            tracing::trace!(
                member = member.name(),
                class = member.declaring_class(),
                "overridden member suppressed"
            );
            false
        })
        .map(|(_, member)| *member)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::hir::reflect::{Modifiers, Visibility};

    fn pairs<T: ClassMember>(members: &[&T]) -> Vec<(String, String)> {
        members
            .iter()
            .map(|m| (m.declaring_class().to_string(), m.name().to_string()))
            .collect()
    }

    fn abc(name: &str) -> ClassDescriptor {
        ClassDescriptor::new(name)
            .method("a", Visibility::Private)
            .method("b", Visibility::Protected)
            .method("c", Visibility::Public)
    }

    #[test]
    fn test_hierarchy_root_first() {
        let a = Arc::new(ClassDescriptor::new("A"));
        let b = Arc::new(ClassDescriptor::new("B").with_parent(a));
        let c = ClassDescriptor::new("C").with_parent(b);

        let names: Vec<_> = class_hierarchy(&c).iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_single_class_keeps_declaration_order() {
        let a = abc("A");
        assert_eq!(
            pairs(&class_methods(&a)),
            vec![
                ("A".into(), "a".into()),
                ("A".into(), "b".into()),
                ("A".into(), "c".into()),
            ]
        );
    }

    #[test]
    fn test_private_members_survive_overrides_collapse() {
        let a = Arc::new(abc("A"));
        let b = Arc::new(abc("B").with_parent(a));
        let c = abc("C").with_parent(b);

        assert_eq!(
            pairs(&class_methods(&c)),
            vec![
                ("A".into(), "a".into()),
                ("B".into(), "a".into()),
                ("C".into(), "a".into()),
                ("C".into(), "b".into()),
                ("C".into(), "c".into()),
            ]
        );
    }

    #[test]
    fn test_inherited_entries_are_not_collected_twice() {
        let a = Arc::new(ClassDescriptor::new("A").method("run", Visibility::Public));
        let inherited = a.methods()[0].clone();
        let b = ClassDescriptor::new("B")
            .with_parent(a)
            .with_method(inherited)
            .method("stop", Visibility::Public);

        assert_eq!(
            pairs(&class_methods(&b)),
            vec![("A".into(), "run".into()), ("B".into(), "stop".into())]
        );
    }

    #[test]
    fn test_static_members_are_excluded() {
        let s = ClassDescriptor::new("S")
            .with_method(MethodDescriptor::new("S", "a", Visibility::Private).with_flags(Modifiers::STATIC))
            .with_property(PropertyDescriptor::new("S", "b", Visibility::Public).static_());

        assert!(class_methods(&s).is_empty());
        assert!(class_properties(&s).is_empty());
    }

    #[test]
    fn test_static_members_excluded_at_every_level() {
        let p = Arc::new(
            ClassDescriptor::new("P")
                .with_method(MethodDescriptor::new("P", "x", Visibility::Protected).with_flags(Modifiers::STATIC))
                .method("y", Visibility::Protected),
        );
        let q = ClassDescriptor::new("Q")
            .with_parent(p)
            .method("x", Visibility::Protected)
            .with_method(MethodDescriptor::new("Q", "y", Visibility::Protected).with_flags(Modifiers::STATIC));

        assert_eq!(
            pairs(&class_methods(&q)),
            vec![("P".into(), "y".into()), ("Q".into(), "x".into())]
        );
    }

    #[test]
    fn test_unrelated_private_members_keep_identity() {
        let x = ClassDescriptor::new("X").property("secret", Visibility::Private);
        let y = ClassDescriptor::new("Y").property("secret", Visibility::Private);

        assert_eq!(pairs(&class_properties(&x)), vec![("X".into(), "secret".into())]);
        assert_eq!(pairs(&class_properties(&y)), vec![("Y".into(), "secret".into())]);
    }

    #[test]
    fn test_filter_overrides_direct() {
        let first = PropertyDescriptor::new("A", "p", Visibility::Public);
        let second = PropertyDescriptor::new("B", "p", Visibility::Public);
        let private = PropertyDescriptor::new("A", "q", Visibility::Private);

        let kept = filter_overrides(vec![&first, &private, &second]);
        assert_eq!(pairs(&kept), vec![("A".into(), "q".into()), ("B".into(), "p".into())]);
    }
}
