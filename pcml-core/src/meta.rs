//! Static calling-convention metadata attached to generated records.
//!
//! Generated records describe each of their fields with a [`FieldMeta`]
//! table exposed through [`PcmlRecord`]. The runtime walks this table to
//! marshal a record to and from the program's parameter list.

use crate::usage::Usage;

/// Fixed-length padding policy of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Padding {
    /// Fixed encoded length.
    pub length: u32,
    /// Fill value written after the significant content.
    pub complete_with: &'static str,
}

/// Kind-specific metadata of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar parameter.
    Data {
        /// Name of the parameter in the descriptor.
        pcml_name: &'static str,
        /// Calling direction.
        usage: Usage,
        /// Padding policy, present only when both length and fill are set.
        padding: Option<Padding>,
    },
    /// Repeated parameter.
    Array {
        /// Name of the parameter in the descriptor.
        pcml_name: &'static str,
        /// Declared number of occurrences.
        size: u32,
        /// Element type name, if one was declared.
        element: Option<&'static str>,
        /// Calling direction.
        usage: Usage,
    },
    /// Nested record.
    Structure,
}

/// Metadata of one generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldMeta {
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// Kind-specific metadata.
    pub kind: FieldKind,
}

impl FieldMeta {
    /// Returns the descriptor name of the field, if it has one.
    #[must_use]
    pub const fn pcml_name(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Data { pcml_name, .. } | FieldKind::Array { pcml_name, .. } => {
                Some(pcml_name)
            }
            FieldKind::Structure => None,
        }
    }

    /// Returns the calling direction; nested records carry none.
    #[must_use]
    pub const fn usage(&self) -> Option<Usage> {
        match self.kind {
            FieldKind::Data { usage, .. } | FieldKind::Array { usage, .. } => Some(usage),
            FieldKind::Structure => None,
        }
    }
}

/// Call-level metadata of a generated program record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramMeta {
    /// Name of the program to call.
    pub program_name: &'static str,
    /// Resource name under which the runtime finds the descriptor.
    pub document_name: &'static str,
}

/// A generated record with a field metadata table.
pub trait PcmlRecord {
    /// Field metadata in declaration order.
    const FIELDS: &'static [FieldMeta];

    /// True for records of a descriptor struct.
    const STRUCTURE: bool = false;

    /// Looks up a field by its Rust identifier.
    fn field(ident: &str) -> Option<&'static FieldMeta> {
        Self::FIELDS.iter().find(|f| f.ident == ident)
    }
}

/// A generated record that is the root parameter list of a program.
pub trait PcmlProgram: PcmlRecord {
    /// Call-level metadata.
    const PROGRAM: ProgramMeta;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl PcmlRecord for Sample {
        const FIELDS: &'static [FieldMeta] = &[
            FieldMeta {
                ident: "zip",
                kind: FieldKind::Data {
                    pcml_name: "ZIP",
                    usage: Usage::Input,
                    padding: Some(Padding {
                        length: 5,
                        complete_with: "0",
                    }),
                },
            },
            FieldMeta {
                ident: "home",
                kind: FieldKind::Structure,
            },
        ];
    }

    impl PcmlProgram for Sample {
        const PROGRAM: ProgramMeta = ProgramMeta {
            program_name: "ADDR",
            document_name: "META-INF.ADDR",
        };
    }

    #[test]
    fn test_field_lookup() {
        let zip = Sample::field("zip").expect("zip is declared");
        assert!(!Sample::STRUCTURE);
        assert_eq!(zip.pcml_name(), Some("ZIP"));
        assert_eq!(zip.usage(), Some(Usage::Input));
        assert!(Sample::field("missing").is_none());
    }

    #[test]
    fn test_structure_has_no_usage() {
        let home = Sample::field("home").expect("home is declared");
        assert_eq!(home.pcml_name(), None);
        assert_eq!(home.usage(), None);
    }

    #[test]
    fn test_program_meta() {
        assert_eq!(Sample::PROGRAM.program_name, "ADDR");
        assert_eq!(Sample::PROGRAM.document_name, "META-INF.ADDR");
    }
}
