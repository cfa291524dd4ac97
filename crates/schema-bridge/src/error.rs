//! Error types for the schema bridge
//!
//! The public mapping surface never fails: every error below is caught at the
//! mapper/marshaller boundary and turned into a documented fallback. The
//! `try_*` helpers expose them for callers that want the detail.

use thiserror::Error;

/// Result type alias using SchemaBridgeError
pub type Result<T> = std::result::Result<T, SchemaBridgeError>;

/// Errors that can occur while bridging schema types
#[derive(Debug, Error)]
pub enum SchemaBridgeError {
    /// Ordinal does not address a variant of the enum type
    #[error("Ordinal {ordinal} is out of range for enum '{name}' with {len} variants")]
    OrdinalOutOfRange {
        name: String,
        ordinal: usize,
        len: usize,
    },

    /// A wire value could not be coerced into the requested host kind
    #[error("Cannot coerce {value} into {expected}")]
    Coercion { expected: &'static str, value: String },

    /// An enum descriptor carried no values to synthesize from
    #[error("Enum '{name}' has an empty value set")]
    EmptyValueSet { name: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchemaBridgeError {
    /// Create a coercion error for the given target kind and offending value
    pub fn coercion(expected: &'static str, value: &serde_json::Value) -> Self {
        Self::Coercion {
            expected,
            value: value.to_string(),
        }
    }
}
