//! Class emitter.
//!
//! Appends resolved fields to generated records and generates their
//! accessors.

use crate::model::{Accessor, GeneratedField, GeneratedType, RustType};
use crate::naming::unraw;
use crate::resolver::ResolvedField;

/// Adds resolved fields to generated records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassEmitter;

impl ClassEmitter {
    /// Creates a new emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends a field to `target` and generates its accessors.
    ///
    /// Identifiers are not checked for uniqueness.
    pub fn emit(&self, target: &mut GeneratedType, field: ResolvedField, ident: impl Into<String>) {
        let ident = ident.into();
        tracing::trace!(record = %target.ident, field = %ident, "emitting field");

        let accessor = self.accessor(&ident, &field.rust_type);
        target.fields.push(GeneratedField {
            ident,
            rust_type: field.rust_type,
            initial: field.initial,
            metadata: field.metadata,
        });
        target.accessors.push(accessor);
    }

    /// Builds the getter, mutable getter and setter names for a field.
    #[must_use]
    pub fn accessor(&self, ident: &str, rust_type: &RustType) -> Accessor {
        let [_, getter_mut, setter] = self.method_names(ident);
        Accessor {
            field: ident.to_string(),
            rust_type: rust_type.clone(),
            getter: ident.to_string(),
            getter_mut,
            setter,
        }
    }

    /// Returns the getter, mutable getter and setter names of a field,
    /// without raw prefixes.
    #[must_use]
    pub fn method_names(&self, ident: &str) -> [String; 3] {
        let base = unraw(ident);
        [base.to_string(), format!("{base}_mut"), format!("set_{base}")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScalarType;
    use crate::model::{FieldMetadata, GeneratedModule, InitialValue, RecordKind};
    use crate::resolver::FieldKind;
    use pcml_core::Usage;

    fn scalar(name: &str) -> ResolvedField {
        ResolvedField {
            kind: FieldKind::Scalar(ScalarType::Char),
            rust_type: RustType::Scalar(ScalarType::Char),
            initial: InitialValue::Default,
            metadata: FieldMetadata::Data {
                pcml_name: name.to_string(),
                usage: Usage::Input,
                padding: None,
            },
        }
    }

    #[test]
    fn test_emit_appends_in_order() {
        let mut module = GeneratedModule::new("m");
        let id = module.add_type("Address", "home", RecordKind::Struct);
        let emitter = ClassEmitter::new();

        emitter.emit(module.get_mut(id), scalar("CITY"), "city");
        emitter.emit(module.get_mut(id), scalar("ZIP"), "zip");

        let record = module.get(id);
        let idents: Vec<_> = record.fields.iter().map(|f| f.ident.as_str()).collect();
        assert_eq!(idents, ["city", "zip"]);
        assert_eq!(record.accessors.len(), 2);
        assert_eq!(record.accessors[1].setter, "set_zip");
        assert_eq!(record.accessors[1].getter_mut, "zip_mut");
    }

    #[test]
    fn test_duplicate_identifiers_are_kept() {
        let mut module = GeneratedModule::new("m");
        let id = module.add_type("Address", "home", RecordKind::Struct);
        let emitter = ClassEmitter::new();

        emitter.emit(module.get_mut(id), scalar("A"), "a");
        emitter.emit(module.get_mut(id), scalar("A"), "a");

        assert_eq!(module.get(id).fields.len(), 2);
    }

    #[test]
    fn test_accessor_names_for_raw_identifiers() {
        let accessor =
            ClassEmitter::new().accessor("r#type", &RustType::Scalar(ScalarType::Char));
        assert_eq!(accessor.getter, "r#type");
        assert_eq!(accessor.getter_mut, "type_mut");
        assert_eq!(accessor.setter, "set_type");
        assert_eq!(
            ClassEmitter::new().method_names("r#type"),
            ["type", "type_mut", "set_type"]
        );
    }
}
