//! Error types for the runtime ABI

/// Result type for ABI calls
pub type AbiResult<T> = Result<T, AbiError>;

/// Failures reported by the runtime behind `JvmContext`.
///
/// A managed exception thrown while the runtime executes a call is translated
/// into `Thrown` at the boundary; nothing above this layer sees the runtime's
/// own exception objects.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AbiError {
    /// A managed exception escaped the call
    #[error("{class}: {message}")]
    Thrown {
        /// Slash-separated class name of the exception
        class: String,
        /// Exception message (empty if none)
        message: String,
    },

    /// Class lookup failed
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    /// Raw member lookup (`get_method_id` and friends) failed
    #[error("No such method: {class}.{name}{signature}")]
    NoSuchMethod {
        /// Class searched
        class: String,
        /// Member name
        name: String,
        /// Member signature
        signature: String,
    },

    /// A handle that the runtime does not know (or already released)
    #[error("Invalid reference: {0:#x}")]
    InvalidReference(u64),

    /// Any other ABI operation failure
    #[error("{0}")]
    Abi(String),
}

impl AbiError {
    /// Build a `Thrown` error
    pub fn thrown(class: impl Into<String>, message: impl Into<String>) -> Self {
        AbiError::Thrown {
            class: class.into(),
            message: message.into(),
        }
    }
}

impl From<String> for AbiError {
    fn from(s: String) -> Self {
        AbiError::Abi(s)
    }
}

impl From<&str> for AbiError {
    fn from(s: &str) -> Self {
        AbiError::Abi(s.to_string())
    }
}
