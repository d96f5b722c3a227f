//! Packaging of generated records.
//!
//! A [`Packager`] receives the finished record graph together with the
//! descriptor it came from. [`Artifact`] is the built-in packager: it renders
//! the graph to one Rust source file and re-serializes the descriptor as a
//! resource under the metadata directory.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::model::GeneratedModule;
use crate::rust::ModuleGenerator;
use pcml_schema::{Pcml, write_pcml};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Consumer of a finished generation run.
pub trait Packager {
    /// Packages a record graph and its descriptor.
    ///
    /// # Errors
    /// Returns `CodegenError` if packaging fails.
    fn package(
        &mut self,
        module: &GeneratedModule,
        pcml: &Pcml,
        config: &GeneratorConfig,
    ) -> Result<(), CodegenError>;
}

/// Rendered sources and resources of one or more generation runs.
///
/// Paths are relative and use `/` separators. A run whose files would
/// replace files of an earlier run is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    sources: BTreeMap<String, String>,
    resources: BTreeMap<String, String>,
}

impl Artifact {
    /// Creates an empty artifact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rendered source files by path.
    #[must_use]
    pub const fn sources(&self) -> &BTreeMap<String, String> {
        &self.sources
    }

    /// Returns the resource files by path.
    #[must_use]
    pub const fn resources(&self) -> &BTreeMap<String, String> {
        &self.resources
    }

    /// Returns a source file by path.
    #[must_use]
    pub fn source(&self, path: &str) -> Option<&str> {
        self.sources.get(path).map(String::as_str)
    }

    /// Returns a resource file by path.
    #[must_use]
    pub fn resource(&self, path: &str) -> Option<&str> {
        self.resources.get(path).map(String::as_str)
    }

    /// Writes every file below `dir`, creating directories as needed.
    ///
    /// Returns the paths written.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let mut written = Vec::with_capacity(self.sources.len() + self.resources.len());
        for (path, contents) in self.sources.iter().chain(&self.resources) {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, contents)?;
            tracing::debug!("Wrote {}", target.display());
            written.push(target);
        }
        Ok(written)
    }
}

impl Packager for Artifact {
    fn package(
        &mut self,
        module: &GeneratedModule,
        pcml: &Pcml,
        config: &GeneratorConfig,
    ) -> Result<(), CodegenError> {
        let source_path = format!("{}.rs", module.name);
        let resource_path = config.resource_path(&pcml.file_name());
        ensure_vacant(&self.sources, &source_path)?;
        ensure_vacant(&self.resources, &resource_path)?;

        let source = ModuleGenerator::new(module, &config.runtime_crate).generate();
        let descriptor = write_pcml(pcml)?;
        self.sources.insert(source_path, source);
        self.resources.insert(resource_path, descriptor);
        Ok(())
    }
}

fn ensure_vacant(files: &BTreeMap<String, String>, path: &str) -> Result<(), CodegenError> {
    if files.contains_key(path) {
        return Err(CodegenError::generation(format!(
            "'{path}' is already part of the artifact"
        )));
    }
    Ok(())
}
