//! Structured error types for the instruction codec.
//!
//! Every failure is returned to the immediate caller. Encoding is
//! deterministic, so nothing here is retried; the caller surfaces the
//! message and blocks submission until the input is corrected.

use thiserror::Error;

use crate::types::PrimitiveType;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Structured error type for the codec.
///
/// # Example
/// ```rust
/// use chaincall_core::config::CodecConfig;
/// use chaincall_core::error::CodecError;
/// use chaincall_core::parse::parse_value;
/// use chaincall_core::types::PrimitiveType;
///
/// let err = parse_value("256", PrimitiveType::U8, &CodecConfig::default()).unwrap_err();
/// assert!(matches!(err, CodecError::Overflow { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Raw text could not be turned into a value of the declared type
    #[error("Invalid {ty} value for '{field}': {message}")]
    Coercion {
        field: String,
        ty: PrimitiveType,
        message: String,
    },

    /// Numeric value does not fit the declared width
    #[error("Value {value} for '{field}' does not fit in {ty}")]
    Overflow {
        field: String,
        ty: PrimitiveType,
        value: String,
    },

    /// Output would grow past the configured maximum
    #[error("Instruction data needs {required} bytes, limit is {limit}")]
    Capacity {
        limit: usize,
        required: usize,
    },

    /// Declared type name is not a supported primitive
    #[error("Unsupported type '{type_name}' for '{field}'")]
    UnknownType {
        field: String,
        type_name: String,
    },

    /// Value could not be written
    #[error("Failed to serialize data: {message}")]
    Serialization {
        message: String,
    },

    /// Encoded buffer does not match the layout being read
    #[error("Decode error at byte {offset}: {message}")]
    Decode {
        offset: usize,
        message: String,
    },

    /// Text is not valid hex
    #[error("Invalid hex: {message}")]
    InvalidHex {
        message: String,
    },

    /// Discriminator has the wrong length
    #[error("Discriminator must be 8 bytes, got {len}")]
    InvalidDiscriminator {
        len: usize,
    },

    /// Codec configuration could not be loaded
    #[error("Config error: {message}")]
    Config {
        message: String,
    },
}

impl CodecError {
    pub(crate) fn coercion(field: &str, ty: PrimitiveType, message: impl Into<String>) -> Self {
        CodecError::Coercion {
            field: field.to_string(),
            ty,
            message: message.into(),
        }
    }

    pub(crate) fn overflow(field: &str, ty: PrimitiveType, value: &str) -> Self {
        CodecError::Overflow {
            field: field.to_string(),
            ty,
            value: value.to_string(),
        }
    }

    pub(crate) fn decode(offset: usize, message: impl Into<String>) -> Self {
        CodecError::Decode {
            offset,
            message: message.into(),
        }
    }

    /// Attach a field name to an error raised before the name was known.
    pub fn for_field(self, name: &str) -> Self {
        match self {
            CodecError::Coercion { ty, message, .. } => CodecError::Coercion {
                field: name.to_string(),
                ty,
                message,
            },
            CodecError::Overflow { ty, value, .. } => CodecError::Overflow {
                field: name.to_string(),
                ty,
                value,
            },
            CodecError::UnknownType { type_name, .. } => CodecError::UnknownType {
                field: name.to_string(),
                type_name,
            },
            other => other,
        }
    }

    /// Get a numeric error code for client-side handling.
    pub fn error_code(&self) -> u32 {
        match self {
            CodecError::Coercion { .. } => 1000,
            CodecError::Overflow { .. } => 1001,
            CodecError::Capacity { .. } => 1002,
            CodecError::UnknownType { .. } => 1003,
            CodecError::Serialization { .. } => 1004,
            CodecError::Decode { .. } => 1005,
            CodecError::InvalidHex { .. } => 1006,
            CodecError::InvalidDiscriminator { .. } => 1007,
            CodecError::Config { .. } => 1008,
        }
    }
}
