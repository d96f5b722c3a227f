//! Descriptor type definitions.
//!
//! This module contains the in-memory form of a PCML document: one
//! [`ProgramDef`], any number of [`StructDef`]s, and the [`DataDef`]
//! parameter declarations they hold. Attribute values are kept verbatim as
//! strings; interpreting them is the generator's job.

/// `type` literal marking a data element whose value is a struct.
pub const STRUCT_MARKER: &str = "struct";

/// Complete PCML descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcml {
    /// Document version attribute.
    pub version: Option<String>,
    /// Struct definitions in declaration order.
    pub structs: Vec<StructDef>,
    /// The program being described.
    pub program: ProgramDef,
    /// File name the descriptor was loaded from.
    file_name: Option<String>,
}

impl Pcml {
    /// Creates a descriptor for a program with no structs.
    #[must_use]
    pub fn new(program: ProgramDef) -> Self {
        Self {
            version: None,
            structs: Vec::new(),
            program,
            file_name: None,
        }
    }

    /// Adds a struct definition.
    pub fn add_struct(&mut self, struct_def: StructDef) {
        self.structs.push(struct_def);
    }

    /// Sets the file name used when the descriptor is packaged.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Returns the file name of the descriptor.
    ///
    /// Falls back to `<program name>.pcml` when the descriptor was not loaded
    /// from a file.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| format!("{}.pcml", self.program.name))
    }

    /// Looks up a struct by name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }
}

/// A record of the descriptor: the program or a struct.
pub trait Record {
    /// Reference name.
    fn name(&self) -> &str;

    /// Human label, if declared.
    fn label(&self) -> Option<&str>;

    /// Data elements in declaration order.
    fn fields(&self) -> &[DataDef];

    /// Returns the text a generated identifier is derived from.
    fn identifier_source(&self) -> &str {
        self.label().unwrap_or_else(|| self.name())
    }
}

/// Program definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramDef {
    /// Program name, used to call it.
    pub name: String,
    /// Label the root record identifier is derived from.
    pub label: Option<String>,
    /// Integrated file system path of the program object.
    pub path: Option<String>,
    /// Service program entry point.
    pub entrypoint: Option<String>,
    /// Order in which output parameters are parsed.
    pub parseorder: Option<String>,
    /// Return value kind for service program entry points.
    pub returnvalue: Option<String>,
    /// Whether the program is thread safe.
    pub threadsafe: Option<String>,
    /// Entry point CCSID.
    pub epccsid: Option<String>,
    /// Parameters in declaration order.
    pub fields: Vec<DataDef>,
}

impl ProgramDef {
    /// Creates a new program definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a parameter.
    pub fn add_field(&mut self, field: DataDef) {
        self.fields.push(field);
    }
}

impl Record for ProgramDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fields(&self) -> &[DataDef] {
        &self.fields
    }
}

/// Struct definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructDef {
    /// Reference name.
    pub name: String,
    /// Label the record identifier is derived from.
    pub label: Option<String>,
    /// Output size.
    pub outputsize: Option<String>,
    /// Offset.
    pub offset: Option<String>,
    /// Base of the offset.
    pub offsetfrom: Option<String>,
    /// Minimum OS version.
    pub minvrm: Option<String>,
    /// Maximum OS version.
    pub maxvrm: Option<String>,
    /// Members in declaration order.
    pub fields: Vec<DataDef>,
}

impl StructDef {
    /// Creates a new struct definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a member.
    pub fn add_field(&mut self, field: DataDef) {
        self.fields.push(field);
    }
}

impl Record for StructDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fields(&self) -> &[DataDef] {
        &self.fields
    }
}

/// Data element: one parameter or struct member.
///
/// Every attribute of the PCML data tag is kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataDef {
    /// Wire-level name.
    pub name: String,
    /// Label the field identifier is derived from.
    pub label: Option<String>,
    /// Data type, or [`STRUCT_MARKER`].
    pub data_type: Option<String>,
    /// Number of occurrences.
    pub count: Option<String>,
    /// Fixed length.
    pub length: Option<String>,
    /// Fill value for fixed-length content.
    pub complete_with: Option<String>,
    /// Calling direction.
    pub usage: Option<String>,
    /// Initial value.
    pub init: Option<String>,
    /// Precision.
    pub precision: Option<String>,
    /// Name of the struct referenced by the PCML `struct` attribute.
    pub struct_name: Option<String>,
    /// Coded character set id.
    pub ccsid: Option<String>,
    /// Pass by value or reference.
    pub passby: Option<String>,
    /// Trim policy.
    pub trim: Option<String>,
    /// Offset.
    pub offset: Option<String>,
    /// Base of the offset.
    pub offsetfrom: Option<String>,
    /// Output size.
    pub outputsize: Option<String>,
    /// Minimum OS version.
    pub minvrm: Option<String>,
    /// Maximum OS version.
    pub maxvrm: Option<String>,
    /// Bidirectional string type.
    pub bidistringtype: Option<String>,
    /// Character type.
    pub chartype: Option<String>,
}

impl DataDef {
    /// Creates a data element with the given name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type.into()),
            ..Self::default()
        }
    }

    /// Returns the data type, or the empty string when absent.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.data_type.as_deref().unwrap_or("")
    }

    /// Returns true if the type attribute is the struct marker.
    #[must_use]
    pub fn is_struct_type(&self) -> bool {
        self.data_type.as_deref() == Some(STRUCT_MARKER)
    }

    /// Returns the text the field identifier is derived from.
    #[must_use]
    pub fn identifier_source(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the count.
    #[must_use]
    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Sets the length.
    #[must_use]
    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    /// Sets the padding fill value.
    #[must_use]
    pub fn with_complete_with(mut self, fill: impl Into<String>) -> Self {
        self.complete_with = Some(fill.into());
        self
    }

    /// Sets the usage.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Sets the precision.
    #[must_use]
    pub fn with_precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = Some(precision.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_marker() {
        assert!(DataDef::new("home", "struct").is_struct_type());
        assert!(!DataDef::new("home", "STRUCT").is_struct_type());
        assert!(!DataDef::new("zip", "char").is_struct_type());
        assert!(!DataDef::default().is_struct_type());
    }

    #[test]
    fn test_identifier_source_prefers_label() {
        let data = DataDef::new("CUSNAM", "char").with_label("customerName");
        assert_eq!(data.identifier_source(), "customerName");
        assert_eq!(DataDef::new("CUSNAM", "char").identifier_source(), "CUSNAM");

        let program = ProgramDef::new("ADDR");
        assert_eq!(program.identifier_source(), "ADDR");
        let program = program.with_label("Address Lookup");
        assert_eq!(program.identifier_source(), "Address Lookup");
    }

    #[test]
    fn test_file_name_fallback() {
        let pcml = Pcml::new(ProgramDef::new("ADDR"));
        assert_eq!(pcml.file_name(), "ADDR.pcml");

        let pcml = pcml.with_file_name("address.pcml");
        assert_eq!(pcml.file_name(), "address.pcml");
    }

    #[test]
    fn test_get_struct() {
        let mut pcml = Pcml::new(ProgramDef::new("ADDR"));
        pcml.add_struct(StructDef::new("home").with_label("Address"));

        assert!(pcml.get_struct("home").is_some());
        assert!(pcml.get_struct("Address").is_none());
    }
}
