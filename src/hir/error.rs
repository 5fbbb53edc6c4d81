//! Error taxonomy for resolution and formatting.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The shape of reflective handle a resolver was constructed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Class,
    ClassConstant,
    Property,
    Method,
    Parameter,
    Function,
    Closure,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKind::Class => "class",
            ContextKind::ClassConstant => "class constant",
            ContextKind::Property => "property",
            ContextKind::Method => "method",
            ContextKind::Parameter => "parameter",
            ContextKind::Function => "function",
            ContextKind::Closure => "closure",
        };
        f.write_str(name)
    }
}

/// Errors raised while building a resolver or rendering a signature.
///
/// All of them abort the operation in progress; nothing is retried and no
/// partial result is produced.
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// The handle has no enclosing class, or the class has no source file.
    #[error("Cannot infer the {inferring} from the given {context}")]
    InvalidContext {
        /// What could not be inferred ("declaring class", "file name").
        inferring: &'static str,
        context: ContextKind,
    },

    /// The source unit could not be read.
    #[error("Could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A type or default-value shape the formatter cannot render.
    #[error("Unsupported {construct}")]
    Unsupported { construct: String },
}

impl ReflectionError {
    pub fn invalid_context(inferring: &'static str, context: ContextKind) -> Self {
        Self::InvalidContext { inferring, context }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
        }
    }

    /// Usage error (bad handle) rather than an environment error.
    pub fn is_invalid_context(&self) -> bool {
        matches!(self, Self::InvalidContext { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReflectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_context_message() {
        let err = ReflectionError::invalid_context("declaring class", ContextKind::Closure);
        assert_eq!(err.to_string(), "Cannot infer the declaring class from the given closure");
        assert!(err.is_invalid_context());
        assert!(!err.is_io());
    }

    #[test]
    fn test_io_message_and_source() {
        let err = ReflectionError::io(
            "/src/Missing.php",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "Could not read /src/Missing.php");
        assert!(err.is_io());
        assert!(std::error::Error::source(&err).is_some());
    }
}
