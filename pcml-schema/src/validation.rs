//! Descriptor validation utilities.
//!
//! Structural checks that a descriptor is usable as generator input. This is
//! not a check against the signature of the program on the host.

use crate::error::SchemaError;
use crate::types::Pcml;
use std::collections::HashSet;

/// Validates a parsed descriptor.
///
/// # Arguments
/// * `pcml` - The descriptor to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if the program name is empty, a struct or data
/// element has an empty name, or two structs share a name.
pub fn validate_schema(pcml: &Pcml) -> Result<(), SchemaError> {
    if pcml.program.name.trim().is_empty() {
        return Err(SchemaError::Validation {
            message: "program name is empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for struct_def in &pcml.structs {
        if struct_def.name.is_empty() {
            return Err(SchemaError::Validation {
                message: "struct with empty name".to_string(),
            });
        }
        if !seen.insert(struct_def.name.as_str()) {
            return Err(SchemaError::DuplicateStruct {
                name: struct_def.name.clone(),
            });
        }
    }

    let records = pcml
        .structs
        .iter()
        .map(|s| (s.name.as_str(), &s.fields))
        .chain(std::iter::once((
            pcml.program.name.as_str(),
            &pcml.program.fields,
        )));
    for (record, fields) in records {
        if let Some(position) = fields.iter().position(|d| d.name.is_empty()) {
            return Err(SchemaError::Validation {
                message: format!("data element {position} of '{record}' has an empty name"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataDef, ProgramDef, StructDef};

    fn descriptor() -> Pcml {
        let mut program = ProgramDef::new("ADDR");
        program.add_field(DataDef::new("home", "struct"));
        let mut pcml = Pcml::new(program);
        let mut home = StructDef::new("home");
        home.add_field(DataDef::new("city", "char"));
        pcml.add_struct(home);
        pcml
    }

    #[test]
    fn test_valid_descriptor() {
        assert!(validate_schema(&descriptor()).is_ok());
    }

    #[test]
    fn test_duplicate_struct() {
        let mut pcml = descriptor();
        pcml.add_struct(StructDef::new("home"));

        let err = validate_schema(&pcml).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateStruct { ref name } if name == "home"));
    }

    #[test]
    fn test_empty_program_name() {
        let mut pcml = descriptor();
        pcml.program.name = "  ".to_string();

        assert!(matches!(
            validate_schema(&pcml),
            Err(SchemaError::Validation { .. })
        ));
    }

    #[test]
    fn test_empty_data_name() {
        let mut pcml = descriptor();
        pcml.program.add_field(DataDef::new("", "char"));

        let err = validate_schema(&pcml).unwrap_err();
        assert!(err.to_string().contains("data element 1 of 'ADDR'"));
    }
}
