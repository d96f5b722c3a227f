//! # PCML Codegen
//!
//! Record generation from PCML descriptors.
//!
//! This crate provides:
//! - The scalar type catalog and field resolution rules
//! - Two-pass generation of a record graph with forward struct references
//! - Rust source rendering of the graph
//! - Packaging of the source together with the descriptor resource

pub mod catalog;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod package;
pub mod registry;
pub mod resolver;
pub mod rust;

pub use catalog::{DefaultPolicy, ScalarType, TypeCatalog};
pub use config::{GeneratorBuilder, GeneratorConfig};
pub use emitter::ClassEmitter;
pub use error::CodegenError;
pub use generator::{GenerationPass, Generator, PassState};
pub use model::{
    Accessor, FieldMetadata, GeneratedField, GeneratedModule, GeneratedType, InitialValue,
    PaddingMeta, ProgramMetadata, RecordKind, RustType, TypeId,
};
pub use package::{Artifact, Packager};
pub use registry::{NotFound, StructRegistry};
pub use resolver::{FieldKind, FieldResolver, ResolvedField, parse_optional_non_negative_int};

/// Generates records from a PCML descriptor string.
///
/// # Arguments
/// * `xml` - PCML document content
///
/// # Returns
/// The rendered source and the descriptor resource.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<Artifact, CodegenError> {
    let pcml = pcml_schema::parse_pcml(xml)?;
    Generator::new().generate_artifact(&pcml)
}

/// Generates records from a PCML descriptor file.
///
/// The descriptor resource keeps the file's name.
///
/// # Arguments
/// * `path` - Path to the PCML document
///
/// # Returns
/// The rendered source and the descriptor resource.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<Artifact, CodegenError> {
    let pcml = pcml_schema::parse_pcml_file(path)?;
    Generator::new().generate_artifact(&pcml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"<pcml version="4.0">
    <program name="QRYCUST" label="Customer Query">
        <data name="CUSNO" label="customerNumber" type="zoned" length="7" precision="0" usage="input"/>
        <data name="CUSNAM" label="customerName" type="char" length="30" usage="output"/>
    </program>
</pcml>"#;

    #[test]
    fn test_generate_from_xml() {
        let artifact = generate_from_xml(DESCRIPTOR).expect("generate");

        let source = artifact.source("customer_query.rs").expect("source");
        assert!(source.contains("pub struct CustomerQuery {"));
        assert!(source.contains("customer_number: Decimal,"));
        assert!(source.contains("pub fn set_customer_name(&mut self, value: String)"));
        assert!(artifact.resource("META-INF/QRYCUST.pcml").is_some());
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("qrycust.pcml");
        std::fs::write(&path, DESCRIPTOR).expect("write descriptor");

        let artifact = generate_from_file(&path).expect("generate");
        assert!(artifact.resource("META-INF/qrycust.pcml").is_some());
        assert!(artifact.source("customer_query.rs").is_some());
    }

    #[test]
    fn test_generate_from_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = generate_from_file(&dir.path().join("missing.pcml")).unwrap_err();
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_unknown_type_produces_no_artifact() {
        let xml = r#"<pcml><program name="P"><data name="x" type="decfloat"/></program></pcml>"#;
        let err = generate_from_xml(xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown type 'decfloat' in field 'x' of 'P'"
        );
    }
}
