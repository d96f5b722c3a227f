//! Generator configuration and builder.

use crate::generator::Generator;

/// Default directory of the packaged descriptor resource.
pub const DEFAULT_METADATA_DIR: &str = "META-INF";

/// Default path of the runtime crate referenced by generated source.
pub const DEFAULT_RUNTIME_CRATE: &str = "pcml";

/// Settings of a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory the descriptor resource is packaged under.
    pub metadata_dir: String,
    /// Module name of the rendered source; derived from the program when unset.
    pub module_name: Option<String>,
    /// Validate the descriptor before generating.
    pub strict: bool,
    /// Crate path used by the `use` lines of the rendered source.
    pub runtime_crate: String,
}

impl GeneratorConfig {
    /// Returns the document path of a program: `<metadata dir>.<program>`.
    #[must_use]
    pub fn document_path(&self, program_name: &str) -> String {
        format!("{}.{}", self.metadata_dir, program_name)
    }

    /// Returns the resource path of a descriptor file: `<metadata dir>/<file>`.
    #[must_use]
    pub fn resource_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.metadata_dir, file_name)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            metadata_dir: DEFAULT_METADATA_DIR.to_string(),
            module_name: None,
            strict: false,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }
}

/// Builder for configuring and creating a generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata directory.
    #[must_use]
    pub fn metadata_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.metadata_dir = dir.into();
        self
    }

    /// Sets the module name of the rendered source.
    #[must_use]
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.config.module_name = Some(name.into());
        self
    }

    /// Enables descriptor validation before generation.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Sets the runtime crate path.
    #[must_use]
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.config.runtime_crate = path.into();
        self
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> Generator {
        Generator::with_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.metadata_dir, "META-INF");
        assert_eq!(config.runtime_crate, "pcml");
        assert!(!config.strict);
        assert!(config.module_name.is_none());
        assert_eq!(config.document_path("ADDR"), "META-INF.ADDR");
        assert_eq!(config.resource_path("addr.pcml"), "META-INF/addr.pcml");
    }

    #[test]
    fn test_builder_overrides() {
        let generator = GeneratorBuilder::new()
            .metadata_dir("descriptors")
            .module_name("address")
            .strict(true)
            .runtime_crate("crate::pcml")
            .build();

        let config = generator.config();
        assert_eq!(config.metadata_dir, "descriptors");
        assert_eq!(config.module_name.as_deref(), Some("address"));
        assert!(config.strict);
        assert_eq!(config.runtime_crate, "crate::pcml");
    }
}
