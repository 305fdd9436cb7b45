//! Error types for the dispatch core

use jinvoke_sdk::AbiError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for dispatch-core operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failures surfaced by the dispatch core.
///
/// Every variant reaches the immediate caller unchanged; nothing in this
/// crate retries or recovers.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No reflected member matched name, arity and argument classes
    #[error("No {kind} of {class} matches {name}({arguments})")]
    Resolution {
        /// `method` or `constructor`
        kind: &'static str,
        /// Class searched
        class: String,
        /// Requested member name (`<init>` for constructors)
        name: String,
        /// Comma-separated argument class names
        arguments: String,
    },

    /// The value does not have the shape the operation requires
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// What the operation needed
        expected: String,
        /// What it was given
        got: String,
    },

    /// Array element type tag with no typed accessor
    #[error("Unsupported array element type tag '{0}'")]
    UnsupportedType(char),

    /// The operation needs a class but the descriptor is the null class
    #[error("Class is null")]
    NullClass,

    /// The runtime raised an exception or rejected the call
    #[error(transparent)]
    Call(#[from] AbiError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BridgeError {
    pub(crate) fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        BridgeError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Overload resolution found nothing
    pub fn is_resolution(&self) -> bool {
        matches!(self, BridgeError::Resolution { .. })
    }

    /// The value had the wrong discriminant, class or element tag
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            BridgeError::TypeMismatch { .. } | BridgeError::UnsupportedType(_) | BridgeError::NullClass
        )
    }

    /// Class name of the managed exception, if the runtime threw one
    pub fn thrown_class(&self) -> Option<&str> {
        match self {
            BridgeError::Call(AbiError::Thrown { class, .. }) => Some(class),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(BridgeError::type_mismatch("array", "int").is_type_mismatch());
        assert!(BridgeError::UnsupportedType('[').is_type_mismatch());
        assert!(BridgeError::NullClass.is_type_mismatch());
        assert!(!BridgeError::NullClass.is_resolution());

        let thrown: BridgeError = AbiError::thrown("java/lang/IllegalStateException", "boom").into();
        assert_eq!(thrown.thrown_class(), Some("java/lang/IllegalStateException"));
        assert_eq!(thrown.to_string(), "java/lang/IllegalStateException: boom");
    }

    #[test]
    fn test_resolution_message() {
        let err = BridgeError::Resolution {
            kind: "method",
            class: "demo/Widget".to_string(),
            name: "resize".to_string(),
            arguments: "java/lang/Integer, java/lang/String".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No method of demo/Widget matches resize(java/lang/Integer, java/lang/String)"
        );
    }
}
