//! Error types for record generation.

use thiserror::Error;

/// Error type for record generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Descriptor parsing error.
    #[error("descriptor parse error: {0}")]
    Parse(#[from] pcml_schema::ParseError),

    /// Descriptor validation error.
    #[error("descriptor error: {0}")]
    Schema(#[from] pcml_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Type name outside the catalog.
    #[error("unknown type '{type_name}' in field '{field}' of '{record}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
        /// Record holding the field.
        record: String,
    },

    /// Struct reference with no matching struct.
    #[error("unresolved struct '{name}' in field '{field}' of '{record}'")]
    UnresolvedStruct {
        /// Struct name that was looked up.
        name: String,
        /// Field name.
        field: String,
        /// Record holding the field.
        record: String,
    },

    /// Generation pass step called out of order.
    #[error("invalid generation state: expected {expected}, found {actual}")]
    InvalidState {
        /// State the step requires.
        expected: String,
        /// State the pass was in.
        actual: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
