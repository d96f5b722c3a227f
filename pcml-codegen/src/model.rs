//! Generated type graph.
//!
//! A [`GeneratedModule`] owns every generated record in an arena and hands
//! out [`TypeId`] handles. Handles exist before the records they name are
//! populated, which lets records reference each other regardless of
//! declaration order.

use crate::catalog::ScalarType;
use pcml_core::Usage;

/// Handle of a generated record within its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Whether a generated record comes from the program or a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Root parameter list.
    Program,
    /// Reusable struct.
    Struct,
}

/// Representation type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RustType {
    /// Catalog scalar.
    Scalar(ScalarType),
    /// Ordered sequence.
    List(Box<RustType>),
    /// Element of a sequence whose element type was not declared.
    Raw,
    /// Another generated record.
    Record(TypeId),
}

impl RustType {
    /// Renders the type as Rust source.
    #[must_use]
    pub fn render(&self, module: &GeneratedModule) -> String {
        match self {
            Self::Scalar(scalar) => scalar.rust_type().to_string(),
            Self::List(element) => format!("Vec<{}>", element.render(module)),
            Self::Raw => "RawElement".to_string(),
            Self::Record(id) => module.get(*id).ident.clone(),
        }
    }
}

/// Initial value expression of a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitialValue {
    /// The type's ordinary default.
    Default,
    /// The zero-valued decimal.
    ZeroDecimal,
    /// A fresh instance of another generated record.
    NewRecord(TypeId),
}

impl InitialValue {
    /// Renders the expression as Rust source.
    #[must_use]
    pub fn render(&self, module: &GeneratedModule) -> String {
        match self {
            Self::Default => "Default::default()".to_string(),
            Self::ZeroDecimal => "Decimal::ZERO".to_string(),
            Self::NewRecord(id) => format!("{}::new()", module.get(*id).ident),
        }
    }
}

/// Fixed-length padding metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaddingMeta {
    /// Fixed length.
    pub length: u32,
    /// Fill value.
    pub complete_with: String,
}

/// Metadata attached to a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldMetadata {
    /// Scalar parameter metadata.
    Data {
        /// Descriptor name of the parameter.
        pcml_name: String,
        /// Calling direction.
        usage: Usage,
        /// Padding, present only when both length and fill are set.
        padding: Option<PaddingMeta>,
    },
    /// Repeated parameter metadata.
    Array {
        /// Descriptor name of the parameter.
        pcml_name: String,
        /// Number of occurrences.
        size: u32,
        /// Element type, absent for struct-marker arrays.
        element: Option<ScalarType>,
        /// Calling direction.
        usage: Usage,
    },
    /// Nested record marker.
    Structure,
}

impl FieldMetadata {
    /// Returns the padding metadata, if any.
    #[must_use]
    pub fn padding(&self) -> Option<&PaddingMeta> {
        match self {
            Self::Data { padding, .. } => padding.as_ref(),
            _ => None,
        }
    }

    /// Returns the calling direction, if the metadata carries one.
    #[must_use]
    pub fn usage(&self) -> Option<Usage> {
        match self {
            Self::Data { usage, .. } | Self::Array { usage, .. } => Some(*usage),
            Self::Structure => None,
        }
    }
}

/// One field of a generated record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedField {
    /// Rust identifier.
    pub ident: String,
    /// Representation type.
    pub rust_type: RustType,
    /// Initial value.
    pub initial: InitialValue,
    /// Attached metadata.
    pub metadata: FieldMetadata,
}

/// Accessor methods generated for one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    /// Field identifier.
    pub field: String,
    /// Type the accessors take and return.
    pub rust_type: RustType,
    /// Shared getter name.
    pub getter: String,
    /// Mutable getter name.
    pub getter_mut: String,
    /// Setter name.
    pub setter: String,
}

/// Call-level metadata of the program record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramMetadata {
    /// Name of the program to call.
    pub program_name: String,
    /// Resource name of the descriptor.
    pub document_path: String,
}

/// A generated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    /// Handle of this record.
    pub id: TypeId,
    /// Rust type identifier.
    pub ident: String,
    /// Descriptor name of the record.
    pub source_name: String,
    /// Program or struct.
    pub kind: RecordKind,
    /// Fields in declaration order.
    pub fields: Vec<GeneratedField>,
    /// Accessors in declaration order.
    pub accessors: Vec<Accessor>,
    /// Call-level metadata; set on the program record only.
    pub program: Option<ProgramMetadata>,
}

impl GeneratedType {
    /// Looks up a field by identifier.
    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&GeneratedField> {
        self.fields.iter().find(|f| f.ident == ident)
    }
}

/// The generated type graph of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedModule {
    /// Module name of the rendered source.
    pub name: String,
    types: Vec<GeneratedType>,
    root: Option<TypeId>,
}

impl GeneratedModule {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            root: None,
        }
    }

    /// Creates an empty record and returns its handle.
    pub fn add_type(
        &mut self,
        ident: impl Into<String>,
        source_name: impl Into<String>,
        kind: RecordKind,
    ) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(GeneratedType {
            id,
            ident: ident.into(),
            source_name: source_name.into(),
            kind,
            fields: Vec::new(),
            accessors: Vec::new(),
            program: None,
        });
        if kind == RecordKind::Program {
            self.root = Some(id);
        }
        id
    }

    /// Returns the record behind a handle.
    ///
    /// # Panics
    /// Panics if the handle belongs to another module.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &GeneratedType {
        &self.types[id.0]
    }

    /// Returns the record behind a handle mutably.
    ///
    /// # Panics
    /// Panics if the handle belongs to another module.
    pub fn get_mut(&mut self, id: TypeId) -> &mut GeneratedType {
        &mut self.types[id.0]
    }

    /// Returns all records in creation order.
    #[must_use]
    pub fn types(&self) -> &[GeneratedType] {
        &self.types
    }

    /// Returns the struct records in creation order.
    pub fn structs(&self) -> impl Iterator<Item = &GeneratedType> {
        self.types.iter().filter(|t| t.kind == RecordKind::Struct)
    }

    /// Returns the program record, once created.
    #[must_use]
    pub fn program(&self) -> Option<&GeneratedType> {
        self.root.map(|id| self.get(id))
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn find(&self, ident: &str) -> Option<&GeneratedType> {
        self.types.iter().find(|t| t.ident == ident)
    }

    /// Returns true if any field type, or list element type, matches `predicate`.
    #[must_use]
    pub fn uses(&self, predicate: impl Fn(&RustType) -> bool) -> bool {
        fn walk(ty: &RustType, predicate: &dyn Fn(&RustType) -> bool) -> bool {
            predicate(ty)
                || match ty {
                    RustType::List(element) => walk(element, predicate),
                    _ => false,
                }
        }
        self.types
            .iter()
            .flat_map(|t| &t.fields)
            .any(|f| walk(&f.rust_type, &predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_exist_before_population() {
        let mut module = GeneratedModule::new("addr");
        let address = module.add_type("Address", "home", RecordKind::Struct);
        let program = module.add_type("Addr", "ADDR", RecordKind::Program);

        assert_eq!(address.index(), 0);
        assert_eq!(module.program().map(|p| p.id), Some(program));
        assert_eq!(RustType::Record(address).render(&module), "Address");
        assert_eq!(
            InitialValue::NewRecord(address).render(&module),
            "Address::new()"
        );
        assert_eq!(module.structs().count(), 1);
    }

    #[test]
    fn test_render_types() {
        let module = GeneratedModule::new("m");
        let list = RustType::List(Box::new(RustType::Scalar(ScalarType::Char)));
        assert_eq!(list.render(&module), "Vec<String>");
        assert_eq!(
            RustType::List(Box::new(RustType::Raw)).render(&module),
            "Vec<RawElement>"
        );
        assert_eq!(InitialValue::ZeroDecimal.render(&module), "Decimal::ZERO");
        assert_eq!(InitialValue::Default.render(&module), "Default::default()");
    }

    #[test]
    fn test_uses_walks_list_elements() {
        let mut module = GeneratedModule::new("m");
        let id = module.add_type("P", "P", RecordKind::Program);
        module.get_mut(id).fields.push(GeneratedField {
            ident: "amounts".to_string(),
            rust_type: RustType::List(Box::new(RustType::Scalar(ScalarType::Packed))),
            initial: InitialValue::Default,
            metadata: FieldMetadata::Structure,
        });

        assert!(module.uses(|t| matches!(t, RustType::Scalar(s) if s.is_decimal())));
        assert!(!module.uses(|t| matches!(t, RustType::Raw)));
    }
}
