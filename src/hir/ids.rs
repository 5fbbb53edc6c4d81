//! Stable structural identities for members and functions.
//!
//! Reflective handles are transient: two handles for the same method are
//! distinct objects, and two distinct closures can look alike. Anything
//! keyed across calls (the memo cache) uses these keys instead, built from
//! the declaring class name and the member name.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

/// A class member identified by its declaring class and name.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct MemberKey {
    /// Fully-qualified name of the declaring class.
    pub class: Arc<str>,
    pub member: SmolStr,
}

impl MemberKey {
    pub fn new(class: impl Into<Arc<str>>, member: impl Into<SmolStr>) -> Self {
        Self {
            class: class.into(),
            member: member.into(),
        }
    }
}

impl fmt::Debug for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberKey({}::{})", self.class, self.member)
    }
}

/// Identity of a named function or method.
///
/// Closures have no stable identity and therefore no key.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FunctionKey {
    Method(MemberKey),
    /// Fully-qualified function name.
    Function(Arc<str>),
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKey::Method(key) => write!(f, "{}::{}", key.class, key.member),
            FunctionKey::Function(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_key_equality() {
        let a = MemberKey::new("App\\A", "run");
        let b = MemberKey::new("App\\A", "run");
        let c = MemberKey::new("App\\B", "run");

        assert_eq!(a, b);
        assert_ne!(a, c); // different declaring class
    }

    #[test]
    fn test_function_key_display() {
        let method = FunctionKey::Method(MemberKey::new("App\\A", "run"));
        let function = FunctionKey::Function(Arc::from("App\\helper"));

        assert_eq!(method.to_string(), "App\\A::run");
        assert_eq!(function.to_string(), "App\\helper");
        assert_ne!(method, function);
    }
}
