//! # PCML
//!
//! Typed records from PCML (Program Call Markup) descriptors.
//!
//! A PCML document describes the parameter list of a callable host program:
//! its fields, their types and sizes, repeated fields, nested structs and the
//! direction each value flows. This crate turns such a document into Rust
//! record structs annotated with the calling-convention metadata a
//! marshalling layer needs.
//!
//! ## Features
//!
//! - **Descriptor model** - Parse and re-serialize PCML documents
//! - **Two-pass generation** - Structs may be referenced before they are declared
//! - **Static metadata** - Usage, array sizes and padding on every generated field
//! - **Derive support** - `#[derive(PcmlRecord)]` for generated and hand-written records
//!
//! ## Quick Start
//!
//! ```ignore
//! use pcml::prelude::*;
//!
//! let artifact = Generator::builder()
//!     .metadata_dir("META-INF")
//!     .build()
//!     .generate_artifact(&parse_pcml_file(path)?)?;
//! artifact.write_to(out_dir)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Usage, field metadata, record traits, decimals
//! - [`schema`] - Descriptor parsing, writing and validation
//! - [`codegen`] - Record generation and packaging

extern crate self as pcml;

pub mod prelude;

/// Runtime vocabulary of generated records.
pub mod core {
    pub use pcml_core::*;
}

/// Descriptor parsing and validation.
pub mod schema {
    pub use pcml_schema::*;
}

/// Record generation from descriptors.
pub mod codegen {
    pub use pcml_codegen::*;
}

// Re-export commonly used items at the crate root
pub use pcml_core::{Decimal, FieldKind, FieldMeta, PcmlProgram, PcmlRecord, Usage};
pub use pcml_derive::PcmlRecord;

pub use pcml_codegen::{Artifact, Generator, GeneratorBuilder, generate_from_file, generate_from_xml};

#[cfg(test)]
mod tests {
    use crate::core::{Padding, RawElement};
    use crate::{Decimal, FieldKind, PcmlProgram, PcmlRecord, Usage};

    #[allow(dead_code)]
    #[derive(Debug, Clone, PartialEq, PcmlRecord)]
    #[pcml(structure)]
    struct Address {
        #[pcml(data(name = "city", usage = "inputoutput"))]
        city: String,
    }

    #[allow(dead_code)]
    #[derive(Debug, Clone, PartialEq, PcmlRecord)]
    #[pcml(program(name = "addr", document = "META-INF.addr"))]
    struct Addr {
        #[pcml(structure)]
        home: Address,
        #[pcml(data(name = "zip", usage = "input", length = 5, complete_with = "0"))]
        zip: String,
        #[pcml(array(name = "tags", size = 3, element = "char", usage = "inputoutput"))]
        tags: Vec<String>,
        #[pcml(array(name = "lines", size = 2))]
        lines: Vec<RawElement>,
        #[pcml(data(name = "AMT", usage = "output"))]
        amount: Decimal,
        r#type: String,
    }

    #[test]
    fn test_derive_field_table() {
        let idents: Vec<_> = Addr::FIELDS.iter().map(|f| f.ident).collect();
        assert_eq!(idents, ["home", "zip", "tags", "lines", "amount", "type"]);
        assert_eq!(Address::FIELDS.len(), 1);
        assert!(Address::STRUCTURE);
        assert!(!Addr::STRUCTURE);
    }

    #[test]
    fn test_derive_data_metadata() {
        let zip = Addr::field("zip").expect("zip");
        assert_eq!(
            zip.kind,
            FieldKind::Data {
                pcml_name: "zip",
                usage: Usage::Input,
                padding: Some(Padding {
                    length: 5,
                    complete_with: "0",
                }),
            }
        );

        let amount = Addr::field("amount").expect("amount");
        assert_eq!(amount.pcml_name(), Some("AMT"));
        assert_eq!(amount.usage(), Some(Usage::Output));

        let unannotated = Addr::field("type").expect("type");
        assert_eq!(
            unannotated.kind,
            FieldKind::Data {
                pcml_name: "type",
                usage: Usage::InputOutput,
                padding: None,
            }
        );
    }

    #[test]
    fn test_derive_array_and_structure_metadata() {
        assert_eq!(
            Addr::field("tags").map(|f| f.kind),
            Some(FieldKind::Array {
                pcml_name: "tags",
                size: 3,
                element: Some("char"),
                usage: Usage::InputOutput,
            })
        );
        assert_eq!(
            Addr::field("lines").map(|f| f.kind),
            Some(FieldKind::Array {
                pcml_name: "lines",
                size: 2,
                element: None,
                usage: Usage::InputOutput,
            })
        );

        let home = Addr::field("home").expect("home");
        assert_eq!(home.kind, FieldKind::Structure);
        assert_eq!(home.usage(), None);
    }

    #[test]
    fn test_derive_program_metadata() {
        assert_eq!(Addr::PROGRAM.program_name, "addr");
        assert_eq!(Addr::PROGRAM.document_name, "META-INF.addr");
    }

    #[allow(dead_code)]
    mod generated {
        include!("../fixtures/addr.rs");
    }

    const ADDRESS_PCML: &str = r#"<pcml>
    <struct name="home" label="Address">
        <data name="city" type="string"/>
    </struct>
    <program name="addr">
        <data name="home" type="struct"/>
        <data name="zip" type="string" length="5" completeWith="0" usage="input"/>
        <data name="tags" type="string" count="3"/>
        <data name="amount" type="packed" length="7" precision="2" usage="output"/>
    </program>
</pcml>"#;

    #[test]
    fn test_generated_source_matches_fixture() {
        let artifact = crate::generate_from_xml(ADDRESS_PCML).expect("generate");
        assert_eq!(
            artifact.source("addr.rs"),
            Some(include_str!("../fixtures/addr.rs"))
        );
    }

    #[test]
    fn test_generated_records_initial_values() {
        let mut record = generated::Addr::new();
        assert_eq!(record.home(), &generated::Address::new());
        assert_eq!(record.zip(), "");
        assert!(record.tags().is_empty());
        assert!(record.amount().is_zero());
        assert_eq!(record, generated::Addr::default());

        record.set_zip("12345".to_string());
        record.home_mut().set_city("Lyon".to_string());
        record.tags_mut().push("a".to_string());
        assert_eq!(record.zip(), "12345");
        assert_eq!(record.home().city(), "Lyon");
        assert_eq!(record.tags().len(), 1);
    }

    #[test]
    fn test_generated_records_metadata() {
        assert_eq!(generated::Addr::PROGRAM.document_name, "META-INF.addr");
        assert_eq!(generated::Addr::FIELDS.len(), 4);
        assert_eq!(
            generated::Addr::field("zip").and_then(|f| f.usage()),
            Some(Usage::Input)
        );
        assert_eq!(
            generated::Address::FIELDS[0].pcml_name(),
            Some("city")
        );
        assert!(generated::Address::STRUCTURE);
        assert!(!generated::Addr::STRUCTURE);
    }
}
