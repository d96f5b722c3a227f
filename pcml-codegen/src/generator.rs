//! Two-pass record generation.
//!
//! A [`GenerationPass`] first creates and registers a record for every
//! struct, then fills the struct records in declaration order, then creates
//! and fills the program record. Registering every struct up front lets any
//! record reference any struct regardless of declaration order.

use crate::catalog::TypeCatalog;
use crate::config::{GeneratorBuilder, GeneratorConfig};
use crate::emitter::ClassEmitter;
use crate::error::CodegenError;
use crate::model::{GeneratedModule, ProgramMetadata, RecordKind, TypeId};
use crate::naming::{field_identifier, type_identifier, unraw};
use crate::package::{Artifact, Packager};
use crate::registry::StructRegistry;
use crate::resolver::FieldResolver;
use pcml_schema::{Pcml, Record, validate_schema};
use std::collections::HashSet;
use std::fmt;

/// Type names a generated source file already uses.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "String",
    "Vec",
    "Default",
    "Decimal",
    "RawElement",
    "PcmlRecord",
];

/// Methods every generated record defines besides its accessors.
const RECORD_METHODS: &[&str] = &["new", "default"];

/// Progress of a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassState {
    /// Nothing generated yet.
    Init,
    /// Every struct record is generated.
    StructsBuilt,
    /// The program record is generated; the module is complete.
    ProgramBuilt,
    /// A step failed; the pass cannot continue.
    Failed,
}

impl fmt::Display for PassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::StructsBuilt => "STRUCTS_BUILT",
            Self::ProgramBuilt => "PROGRAM_BUILT",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Record generator for PCML descriptors.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
    catalog: TypeCatalog,
    emitter: ClassEmitter,
}

impl Generator {
    /// Creates a generator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the given settings.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            catalog: TypeCatalog::new(),
            emitter: ClassEmitter::new(),
        }
    }

    /// Returns a builder for configuring a generator.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the settings.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Starts a generation pass over a descriptor.
    #[must_use]
    pub fn pass<'a>(&'a self, pcml: &'a Pcml) -> GenerationPass<'a> {
        GenerationPass::new(self, pcml)
    }

    /// Generates the record graph of a descriptor.
    ///
    /// # Errors
    /// Returns `CodegenError` on the first field that cannot be resolved, or
    /// on validation failure in strict mode.
    pub fn generate(&self, pcml: &Pcml) -> Result<GeneratedModule, CodegenError> {
        let mut pass = self.pass(pcml);
        pass.build_structs()?;
        pass.build_program()?;
        pass.finish()
    }

    /// Generates the record graph and hands it to a packager.
    ///
    /// The packager is not called when generation fails.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation or packaging fails.
    pub fn generate_with<P: Packager>(
        &self,
        pcml: &Pcml,
        packager: &mut P,
    ) -> Result<(), CodegenError> {
        let module = self.generate(pcml)?;
        packager.package(&module, pcml, &self.config)
    }

    /// Generates the record graph and packages it into an [`Artifact`].
    ///
    /// # Errors
    /// Returns `CodegenError` if generation or packaging fails.
    pub fn generate_artifact(&self, pcml: &Pcml) -> Result<Artifact, CodegenError> {
        let mut artifact = Artifact::new();
        self.generate_with(pcml, &mut artifact)?;
        Ok(artifact)
    }

    fn module_name(&self, pcml: &Pcml) -> String {
        match &self.config.module_name {
            Some(name) => name.clone(),
            None => unraw(&field_identifier(pcml.program.identifier_source())).to_string(),
        }
    }
}

/// One run of the generator over one descriptor.
///
/// Owns the struct registry and the record graph of the run.
pub struct GenerationPass<'a> {
    generator: &'a Generator,
    pcml: &'a Pcml,
    registry: StructRegistry,
    module: GeneratedModule,
    state: PassState,
}

impl<'a> GenerationPass<'a> {
    fn new(generator: &'a Generator, pcml: &'a Pcml) -> Self {
        Self {
            generator,
            pcml,
            registry: StructRegistry::new(),
            module: GeneratedModule::new(generator.module_name(pcml)),
            state: PassState::Init,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PassState {
        self.state
    }

    /// Returns the struct registry.
    #[must_use]
    pub const fn registry(&self) -> &StructRegistry {
        &self.registry
    }

    /// Returns the record graph built so far.
    #[must_use]
    pub const fn module(&self) -> &GeneratedModule {
        &self.module
    }

    /// Generates every struct record.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidState` unless the pass is in
    /// [`PassState::Init`], or the first resolution failure.
    pub fn build_structs(&mut self) -> Result<(), CodegenError> {
        self.expect_state(PassState::Init)?;
        let result = self.populate_structs();
        self.advance(result, PassState::StructsBuilt)
    }

    /// Generates the program record.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidState` unless the pass is in
    /// [`PassState::StructsBuilt`], or the first resolution failure.
    pub fn build_program(&mut self) -> Result<TypeId, CodegenError> {
        self.expect_state(PassState::StructsBuilt)?;
        let result = self.populate_program();
        self.advance(result, PassState::ProgramBuilt)
    }

    /// Completes the pass and returns the record graph.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidState` unless the pass is in
    /// [`PassState::ProgramBuilt`].
    pub fn finish(self) -> Result<GeneratedModule, CodegenError> {
        self.expect_state(PassState::ProgramBuilt)?;
        tracing::info!(
            "Generated {} records for program {}",
            self.module.types().len(),
            self.pcml.program.name
        );
        Ok(self.module)
    }

    fn populate_structs(&mut self) -> Result<(), CodegenError> {
        if self.generator.config.strict {
            validate_schema(self.pcml)?;
        }

        let pcml = self.pcml;
        let mut handles = Vec::with_capacity(pcml.structs.len());
        for struct_def in &pcml.structs {
            let ident = self.unique_ident(type_identifier(struct_def.identifier_source()));
            let id = self
                .module
                .add_type(ident, struct_def.name.clone(), RecordKind::Struct);
            self.registry.register(struct_def.name.clone(), id);
            handles.push(id);
        }
        tracing::debug!("Registered {} structs", self.registry.len());

        for (struct_def, id) in pcml.structs.iter().zip(handles) {
            self.populate(struct_def, id)?;
        }
        Ok(())
    }

    fn populate_program(&mut self) -> Result<TypeId, CodegenError> {
        let pcml = self.pcml;
        let program = &pcml.program;
        let ident = self.unique_ident(type_identifier(program.identifier_source()));
        let id = self
            .module
            .add_type(ident, program.name.clone(), RecordKind::Program);
        self.module.get_mut(id).program = Some(ProgramMetadata {
            program_name: program.name.clone(),
            document_path: self.generator.config.document_path(&program.name),
        });
        self.populate(program, id)?;
        Ok(id)
    }

    fn populate(&mut self, record: &dyn Record, id: TypeId) -> Result<(), CodegenError> {
        let resolver = FieldResolver::new(&self.generator.catalog, &self.registry);
        let mut taken: HashSet<String> = RECORD_METHODS.iter().map(|m| m.to_string()).collect();
        for data in record.fields() {
            let resolved = resolver.resolve(data, record.name())?;
            let ident = self.unique_field_ident(
                &mut taken,
                field_identifier(data.identifier_source()),
                record.name(),
            );
            self.generator
                .emitter
                .emit(self.module.get_mut(id), resolved, ident);
        }
        tracing::debug!(
            "Populated {} with {} fields",
            record.name(),
            record.fields().len()
        );
        Ok(())
    }

    fn unique_ident(&self, ident: String) -> String {
        let is_free = |candidate: &str| {
            self.module.find(candidate).is_none() && !RESERVED_TYPE_NAMES.contains(&candidate)
        };
        if is_free(&ident) {
            return ident;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{ident}{n}");
            if is_free(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Picks a field identifier whose accessors clash with nothing in
    /// `taken`, then marks them as taken.
    fn unique_field_ident(&self, taken: &mut HashSet<String>, ident: String, record: &str) -> String {
        let emitter = &self.generator.emitter;
        let is_free = |candidate: &str| {
            emitter
                .method_names(candidate)
                .iter()
                .all(|name| !taken.contains(name))
        };
        let chosen = if is_free(&ident) {
            ident
        } else {
            let mut n = 2;
            let renamed = loop {
                let candidate = format!("{}{n}", unraw(&ident));
                if is_free(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            tracing::warn!(
                "Field {} of {} clashes with an earlier name, renamed to {}",
                ident,
                record,
                renamed
            );
            renamed
        };
        taken.extend(emitter.method_names(&chosen));
        chosen
    }

    fn expect_state(&self, expected: PassState) -> Result<(), CodegenError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CodegenError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            })
        }
    }

    fn advance<T>(
        &mut self,
        result: Result<T, CodegenError>,
        next: PassState,
    ) -> Result<T, CodegenError> {
        match result {
            Ok(value) => {
                tracing::info!("Generation pass {} -> {}", self.state, next);
                self.state = next;
                Ok(value)
            }
            Err(e) => {
                tracing::error!("Generation failed in state {}: {}", self.state, e);
                self.state = PassState::Failed;
                Err(e)
            }
        }
    }
}
