//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use pcml::prelude::*;
//! ```

// Runtime vocabulary
pub use pcml_core::error::{Error as CoreError, Result as CoreResult};
pub use pcml_core::{
    Decimal, FieldKind, FieldMeta, Padding, PcmlProgram, PcmlRecord, ProgramMeta, RawElement,
    Usage,
};
pub use pcml_derive::PcmlRecord;

// Descriptor types
pub use pcml_schema::{
    DataDef, ParseError, Pcml, ProgramDef, Record, SchemaError, StructDef, parse_pcml,
    parse_pcml_file, validate_schema, write_pcml,
};

// Generation
pub use pcml_codegen::{
    Artifact, CodegenError, GeneratedModule, Generator, GeneratorBuilder, GeneratorConfig,
    Packager, generate_from_file, generate_from_xml,
};
