//! # PCML Schema
//!
//! PCML descriptor model, parser and writer.
//!
//! This crate provides:
//! - Type definitions for descriptor elements (program, struct, data)
//! - XML parsing of PCML documents
//! - XML serialization back to PCML
//! - Structural validation

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;
pub mod writer;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_pcml, parse_pcml_file};
pub use types::{DataDef, Pcml, ProgramDef, Record, STRUCT_MARKER, StructDef};
pub use validation::validate_schema;
pub use writer::{write_pcml, write_pcml_to};
