//! Rust code generation modules.

pub mod module;
pub mod records;

pub use module::ModuleGenerator;
pub use records::{RecordGenerator, field_attribute};

/// Runtime crate path the derive macro assumes when none is given.
pub(crate) const DEFAULT_CRATE_PATH: &str = "pcml";

/// Makes descriptor text safe to place in a line comment.
///
/// Control characters, line breaks included, become spaces.
pub(crate) fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
