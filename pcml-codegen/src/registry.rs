//! Struct registry.
//!
//! Maps struct reference names to the handles of their generated records.
//! A registry belongs to one generation pass and is filled completely before
//! any field is resolved.

use crate::model::TypeId;
use std::collections::HashMap;
use thiserror::Error;

/// Lookup of a struct name that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("struct '{name}' is not declared")]
pub struct NotFound {
    /// The name that was looked up.
    pub name: String,
}

/// Struct name to generated record mapping.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    entries: HashMap<String, TypeId>,
}

impl StructRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a struct, returning the handle it replaces, if any.
    pub fn register(&mut self, name: impl Into<String>, id: TypeId) -> Option<TypeId> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), id);
        if previous.is_some() {
            tracing::warn!(struct_name = %name, "struct registered twice, keeping the last definition");
        } else {
            tracing::trace!(struct_name = %name, "registered struct");
        }
        previous
    }

    /// Looks up a struct by reference name.
    ///
    /// # Errors
    /// Returns [`NotFound`] if no struct with this name was registered.
    pub fn lookup(&self, name: &str) -> Result<TypeId, NotFound> {
        self.entries.get(name).copied().ok_or_else(|| NotFound {
            name: name.to_string(),
        })
    }

    /// Returns true if a struct with this name was registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered structs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
