//! Record struct code generation.

use crate::catalog::ScalarType;
use crate::model::{
    Accessor, FieldMetadata, GeneratedField, GeneratedModule, GeneratedType, RecordKind, RustType,
};
use super::comment_text;
use crate::naming::unraw;

/// Generator for one record struct with its constructor and accessors.
pub struct RecordGenerator<'a> {
    module: &'a GeneratedModule,
    record: &'a GeneratedType,
    runtime_crate: &'a str,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(module: &'a GeneratedModule, record: &'a GeneratedType, runtime_crate: &'a str) -> Self {
        Self {
            module,
            record,
            runtime_crate,
        }
    }

    /// Generates the struct definition and its impls.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_struct());
        output.push_str(&self.generate_impl());
        output.push_str(&self.generate_default());
        output
    }

    fn generate_struct(&self) -> String {
        let mut output = String::new();
        let record = self.record;

        let source_name = comment_text(&record.source_name);
        match record.kind {
            RecordKind::Program => output.push_str(&format!(
                "/// Parameter list of program `{}`.\n",
                source_name
            )),
            RecordKind::Struct => output.push_str(&format!(
                "/// Record for struct `{}`.\n",
                source_name
            )),
        }
        output.push_str("#[derive(Debug, Clone, PartialEq, PcmlRecord)]\n");
        if self.runtime_crate != super::DEFAULT_CRATE_PATH {
            output.push_str(&format!("#[pcml(crate = {:?})]\n", self.runtime_crate));
        }
        match &record.program {
            Some(program) => output.push_str(&format!(
                "#[pcml(program(name = {:?}, document = {:?}))]\n",
                program.program_name, program.document_path
            )),
            None => output.push_str("#[pcml(structure)]\n"),
        }

        if record.fields.is_empty() {
            output.push_str(&format!("pub struct {} {{}}\n\n", record.ident));
            return output;
        }

        output.push_str(&format!("pub struct {} {{\n", record.ident));
        for field in &record.fields {
            output.push_str(&format!("    {}\n", field_attribute(&field.metadata)));
            output.push_str(&format!(
                "    {}: {},\n",
                field.ident,
                field.rust_type.render(self.module)
            ));
        }
        output.push_str("}\n\n");

        output
    }

    fn generate_impl(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl {} {{\n", self.record.ident));
        output.push_str("    /// Creates a record with every field at its initial value.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new() -> Self {\n");
        if self.record.fields.is_empty() {
            output.push_str("        Self {}\n");
        } else {
            output.push_str("        Self {\n");
            for field in &self.record.fields {
                output.push_str(&self.generate_initializer(field));
            }
            output.push_str("        }\n");
        }
        output.push_str("    }\n");

        for accessor in &self.record.accessors {
            output.push('\n');
            output.push_str(&self.generate_accessors(accessor));
        }

        output.push_str("}\n\n");
        output
    }

    fn generate_initializer(&self, field: &GeneratedField) -> String {
        format!(
            "            {}: {},\n",
            field.ident,
            field.initial.render(self.module)
        )
    }

    /// Generates the getter, mutable getter and setter of one field.
    fn generate_accessors(&self, accessor: &Accessor) -> String {
        let mut output = String::new();
        let name = unraw(&accessor.field);
        let owned = accessor.rust_type.render(self.module);
        let (returned, borrow) = self.getter_type(&accessor.rust_type);

        output.push_str(&format!("    /// Returns `{}`.\n", name));
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> {} {{\n",
            accessor.getter, returned
        ));
        output.push_str(&format!("        {}self.{}\n", borrow, accessor.field));
        output.push_str("    }\n\n");

        output.push_str(&format!("    /// Returns `{}` mutably.\n", name));
        output.push_str(&format!(
            "    pub fn {}(&mut self) -> &mut {} {{\n",
            accessor.getter_mut, owned
        ));
        output.push_str(&format!("        &mut self.{}\n", accessor.field));
        output.push_str("    }\n\n");

        output.push_str(&format!("    /// Sets `{}`.\n", name));
        output.push_str(&format!(
            "    pub fn {}(&mut self, value: {}) {{\n",
            accessor.setter, owned
        ));
        output.push_str(&format!("        self.{} = value;\n", accessor.field));
        output.push_str("    }\n");

        output
    }

    /// Returns the getter return type and the borrow prefix of its body.
    fn getter_type(&self, rust_type: &RustType) -> (String, &'static str) {
        match rust_type {
            RustType::Scalar(
                ScalarType::Char | ScalarType::Date | ScalarType::Time | ScalarType::Timestamp,
            ) => ("&str".to_string(), "&"),
            RustType::Scalar(ScalarType::Byte) => ("&[u8]".to_string(), "&"),
            RustType::Scalar(scalar) => (scalar.rust_type().to_string(), ""),
            RustType::List(element) => (format!("&[{}]", element.render(self.module)), "&"),
            RustType::Raw | RustType::Record(_) => {
                (format!("&{}", rust_type.render(self.module)), "&")
            }
        }
    }

    fn generate_default(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("impl Default for {} {{\n", self.record.ident));
        output.push_str("    fn default() -> Self {\n");
        output.push_str("        Self::new()\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");
        output
    }
}

/// Renders the `#[pcml(...)]` attribute carrying a field's metadata.
#[must_use]
pub fn field_attribute(metadata: &FieldMetadata) -> String {
    match metadata {
        FieldMetadata::Data {
            pcml_name,
            usage,
            padding,
        } => {
            let mut args = format!("name = {:?}, usage = {:?}", pcml_name, usage.value());
            if let Some(padding) = padding {
                args.push_str(&format!(
                    ", length = {}, complete_with = {:?}",
                    padding.length, padding.complete_with
                ));
            }
            format!("#[pcml(data({args}))]")
        }
        FieldMetadata::Array {
            pcml_name,
            size,
            element,
            usage,
        } => {
            let mut args = format!("name = {:?}, size = {}", pcml_name, size);
            if let Some(element) = element {
                args.push_str(&format!(", element = {:?}", element.pcml_name()));
            }
            args.push_str(&format!(", usage = {:?}", usage.value()));
            format!("#[pcml(array({args}))]")
        }
        FieldMetadata::Structure => "#[pcml(structure)]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaddingMeta;
    use pcml_core::Usage;

    #[test]
    fn test_field_attributes() {
        let padded = FieldMetadata::Data {
            pcml_name: "zip".to_string(),
            usage: Usage::Input,
            padding: Some(PaddingMeta {
                length: 5,
                complete_with: "0".to_string(),
            }),
        };
        assert_eq!(
            field_attribute(&padded),
            r#"#[pcml(data(name = "zip", usage = "input", length = 5, complete_with = "0"))]"#
        );

        let array = FieldMetadata::Array {
            pcml_name: "addr".to_string(),
            size: 3,
            element: None,
            usage: Usage::InputOutput,
        };
        assert_eq!(
            field_attribute(&array),
            r#"#[pcml(array(name = "addr", size = 3, usage = "inputoutput"))]"#
        );

        let array = FieldMetadata::Array {
            pcml_name: "tags".to_string(),
            size: 3,
            element: Some(ScalarType::Char),
            usage: Usage::Output,
        };
        assert_eq!(
            field_attribute(&array),
            r#"#[pcml(array(name = "tags", size = 3, element = "char", usage = "output"))]"#
        );

        assert_eq!(
            field_attribute(&FieldMetadata::Structure),
            "#[pcml(structure)]"
        );
    }

    #[test]
    fn test_quotes_in_names_are_escaped() {
        let data = FieldMetadata::Data {
            pcml_name: "say \"hi\"".to_string(),
            usage: Usage::InputOutput,
            padding: None,
        };
        assert!(field_attribute(&data).contains(r#"name = "say \"hi\"""#));
    }
}
