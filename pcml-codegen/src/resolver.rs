//! Field resolution.
//!
//! Decides the kind of each data element and produces its representation
//! type, initial value and metadata. Kind precedence is fixed: a positive
//! `count` makes an array even when the type is the struct marker, then the
//! struct marker makes a struct reference, and everything else is a scalar.

use crate::catalog::{DefaultPolicy, ScalarType, TypeCatalog};
use crate::error::CodegenError;
use crate::model::{FieldMetadata, InitialValue, PaddingMeta, RustType, TypeId};
use crate::registry::StructRegistry;
use pcml_core::Usage;
use pcml_schema::DataDef;

/// Kind of a resolved field, decided once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single catalog value.
    Scalar(ScalarType),
    /// Repeated value; `None` when the element type is the struct marker.
    Array(Option<ScalarType>),
    /// Nested generated record.
    StructRef(TypeId),
}

/// Output of field resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Field kind.
    pub kind: FieldKind,
    /// Representation type.
    pub rust_type: RustType,
    /// Initial value.
    pub initial: InitialValue,
    /// Metadata to attach.
    pub metadata: FieldMetadata,
}

/// Parses an optional numeric attribute.
///
/// Returns `None` when the text is absent, not a number, or negative.
/// Surrounding whitespace makes the text not a number.
#[must_use]
pub fn parse_optional_non_negative_int(text: Option<&str>) -> Option<u32> {
    text.and_then(|t| t.parse::<u32>().ok())
}

/// Resolves data elements against a type catalog and a struct registry.
pub struct FieldResolver<'a> {
    catalog: &'a TypeCatalog,
    registry: &'a StructRegistry,
}

impl<'a> FieldResolver<'a> {
    /// Creates a new field resolver.
    #[must_use]
    pub fn new(catalog: &'a TypeCatalog, registry: &'a StructRegistry) -> Self {
        Self { catalog, registry }
    }

    /// Resolves one data element of `record`.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownType`] for a type outside the catalog
    /// and [`CodegenError::UnresolvedStruct`] for a struct reference with no
    /// registered struct.
    pub fn resolve(&self, data: &DataDef, record: &str) -> Result<ResolvedField, CodegenError> {
        let count = numeric_attribute(data, "count", data.count.as_deref());
        if count > 0 {
            return self.resolve_array(data, record, count);
        }
        if data.is_struct_type() {
            return self.resolve_struct(data, record);
        }
        self.resolve_scalar(data, record)
    }

    fn resolve_array(
        &self,
        data: &DataDef,
        record: &str,
        size: u32,
    ) -> Result<ResolvedField, CodegenError> {
        let element = if data.is_struct_type() {
            None
        } else {
            Some(self.catalog_type(data, record)?)
        };
        let element_type = element.map_or(RustType::Raw, RustType::Scalar);

        Ok(ResolvedField {
            kind: FieldKind::Array(element),
            rust_type: RustType::List(Box::new(element_type)),
            initial: InitialValue::Default,
            metadata: FieldMetadata::Array {
                pcml_name: data.name.clone(),
                size,
                element,
                usage: Usage::resolve(data.usage.as_deref()),
            },
        })
    }

    fn resolve_struct(&self, data: &DataDef, record: &str) -> Result<ResolvedField, CodegenError> {
        let id = self
            .registry
            .lookup(&data.name)
            .map_err(|e| CodegenError::UnresolvedStruct {
                name: e.name,
                field: data.name.clone(),
                record: record.to_string(),
            })?;

        Ok(ResolvedField {
            kind: FieldKind::StructRef(id),
            rust_type: RustType::Record(id),
            initial: InitialValue::NewRecord(id),
            metadata: FieldMetadata::Structure,
        })
    }

    fn resolve_scalar(&self, data: &DataDef, record: &str) -> Result<ResolvedField, CodegenError> {
        let scalar = self.catalog_type(data, record)?;
        let length = numeric_attribute(data, "length", data.length.as_deref());
        let complete_with = data.complete_with.as_deref().unwrap_or("");

        let padding = (length > 0 && !complete_with.is_empty()).then(|| PaddingMeta {
            length,
            complete_with: complete_with.to_string(),
        });
        let initial = match scalar.default_policy() {
            DefaultPolicy::Zero => InitialValue::ZeroDecimal,
            DefaultPolicy::DefaultConstruct => InitialValue::Default,
        };

        Ok(ResolvedField {
            kind: FieldKind::Scalar(scalar),
            rust_type: RustType::Scalar(scalar),
            initial,
            metadata: FieldMetadata::Data {
                pcml_name: data.name.clone(),
                usage: Usage::resolve(data.usage.as_deref()),
                padding,
            },
        })
    }

    fn catalog_type(&self, data: &DataDef, record: &str) -> Result<ScalarType, CodegenError> {
        let length = numeric_attribute(data, "length", data.length.as_deref());
        let precision = numeric_attribute(data, "precision", data.precision.as_deref());
        self.catalog
            .resolve_sized(data.type_name(), length, precision)
            .ok_or_else(|| CodegenError::UnknownType {
                type_name: data.type_name().to_string(),
                field: data.name.clone(),
                record: record.to_string(),
            })
    }
}

/// Reads a numeric attribute, recovering absent or malformed values as 0.
fn numeric_attribute(data: &DataDef, attribute: &str, text: Option<&str>) -> u32 {
    match parse_optional_non_negative_int(text) {
        Some(value) => value,
        None => {
            if let Some(text) = text {
                tracing::debug!(
                    field = %data.name,
                    attribute,
                    value = text,
                    "malformed numeric attribute, using 0"
                );
            }
            0
        }
    }
}
