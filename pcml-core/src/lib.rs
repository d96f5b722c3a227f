//! # PCML Core
//!
//! Runtime vocabulary shared by the record generator and the records it
//! produces.
//!
//! This crate provides:
//! - [`Usage`], the calling direction of a parameter
//! - Static field and program metadata ([`FieldMeta`], [`ProgramMeta`])
//! - The [`PcmlRecord`] and [`PcmlProgram`] traits implemented by generated records
//! - Value types referenced by generated records ([`Decimal`], [`RawElement`])

pub mod error;
pub mod meta;
pub mod types;
pub mod usage;

pub use error::{Error, Result};
pub use meta::{FieldKind, FieldMeta, Padding, PcmlProgram, PcmlRecord, ProgramMeta};
pub use types::{Decimal, RawElement};
pub use usage::Usage;
