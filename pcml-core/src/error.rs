//! Error types for PCML core operations.

use thiserror::Error;

/// Core error type for PCML runtime values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A decimal literal could not be parsed.
    #[error("invalid decimal literal '{value}'")]
    InvalidDecimal {
        /// The rejected literal.
        value: String,
    },

    /// A decimal literal has more digits than the mantissa can hold.
    #[error("decimal literal '{value}' overflows 128-bit mantissa")]
    DecimalOverflow {
        /// The rejected literal.
        value: String,
    },

    /// An unknown usage literal was given where a strict parse was requested.
    #[error("unknown usage '{value}', expected input, output or inputoutput")]
    UnknownUsage {
        /// The rejected literal.
        value: String,
    },
}

/// Result type alias for PCML core operations.
pub type Result<T> = std::result::Result<T, Error>;
