use std::path::PathBuf;

use qtmoc_common::{GoFormatter, MocCompiler, MocConfig};
use qtmoc_model::builder::map_member_types;
use qtmoc_model::library::builtin_modules;
use qtmoc_model::{
    ClassModelBuilder, ClassRecord, LibraryModule, MAIN_MODULE, Registry, ResolveReport, resolve,
};
use qtmoc_scan::SourceFile;

use crate::emit::{Artifacts, EmitContext, Emitter, TemplateEmitter};
use crate::error::GenerationError;
use crate::sources::{ScannedFile, collect_sources, load_library_dir, scan_file};

/// Package used when no scanned file has a package clause.
pub const DEFAULT_PACKAGE: &str = "main";

/// The resolved class model of one target directory.
#[derive(Debug, Clone)]
pub struct ClassModel {
    pub registry: Registry,
    /// Go package of the scanned files.
    pub package: String,
    /// Every struct found, before pruning.
    pub discovered: Vec<String>,
    /// Parameter and result types that fell back to `void`.
    pub unmapped: usize,
    pub resolution: ResolveReport,
}

impl ClassModel {
    /// Discovered classes that survived pruning.
    pub fn classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.registry.classes_in_module(MAIN_MODULE)
    }
}

/// Outcome of [`Driver::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Classes the artifacts were generated for.
    pub classes: Vec<String>,
    pub pruned: Vec<String>,
    pub unmapped: usize,
    /// Artifacts written, in write order.
    pub written: Vec<PathBuf>,
    /// Combined output of `moc`, when it ran.
    pub moc_output: Option<String>,
}

/// Runs the generator over one target directory.
#[derive(Debug, Clone)]
pub struct Driver<E = TemplateEmitter> {
    config: MocConfig,
    emitter: E,
}

impl Driver<TemplateEmitter> {
    pub fn new(config: MocConfig) -> Self {
        Self::with_emitter(config, TemplateEmitter::new())
    }
}

impl<E: Emitter> Driver<E> {
    pub fn with_emitter(config: MocConfig, emitter: E) -> Self {
        Self { config, emitter }
    }

    pub fn config(&self) -> &MocConfig {
        &self.config
    }

    /// Built-in modules followed by those of the configured library directory.
    pub fn load_libraries(&self) -> Result<Vec<LibraryModule>, GenerationError> {
        let mut modules = builtin_modules()?;
        if let Some(dir) = &self.config.library_dir {
            modules.extend(load_library_dir(dir)?);
        }
        Ok(modules)
    }

    /// Collects and scans the Go files of the target directory.
    pub fn scan(&self) -> Result<Vec<ScannedFile>, GenerationError> {
        let dir = self.config.target_dir();
        let paths = collect_sources(dir)?;
        tracing::event!(
            tracing::Level::INFO,
            "Scanning {} Go files in {}",
            paths.len(),
            dir.display()
        );
        paths.iter().map(|p| scan_file(p)).collect()
    }

    /// Scans the target directory and resolves its class model.
    pub fn build_model(&self) -> Result<ClassModel, GenerationError> {
        let files = self.scan()?;
        self.build_model_from(&files)
    }

    /// Registers, maps and resolves the classes of already scanned files.
    pub fn build_model_from(&self, files: &[ScannedFile]) -> Result<ClassModel, GenerationError> {
        let mut registry = Registry::with_libraries(self.load_libraries()?);
        let sources: Vec<SourceFile> = files.iter().map(|f| f.source.clone()).collect();

        let discovered = ClassModelBuilder::new(&mut registry).build(&sources)?;
        let unmapped = map_member_types(&mut registry);
        let resolution = resolve(&mut registry);

        Ok(ClassModel {
            registry,
            package: package_of(files),
            discovered,
            unmapped,
            resolution,
        })
    }

    pub fn emit(&self, model: &ClassModel) -> Result<Artifacts, GenerationError> {
        let pkg_config = self.config.pkg_config_packages();
        let ctx = EmitContext::new(&model.registry, &model.package, &pkg_config);
        Ok(self.emitter.emit(&ctx)?)
    }

    /// Writes `moc.cpp`, `moc.h` and `moc.go` into the target directory.
    pub fn write_artifacts(&self, artifacts: &Artifacts) -> Result<Vec<PathBuf>, GenerationError> {
        let outputs = [
            (self.config.cpp_path(), &artifacts.cpp),
            (self.config.header_path(), &artifacts.header),
            (self.config.glue_path(), &artifacts.glue),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (path, contents) in outputs {
            std::fs::write(&path, contents).map_err(|source| GenerationError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::event!(tracing::Level::DEBUG, "Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Runs `moc` over the written source, returning its output.
    pub fn run_moc(&self) -> Result<String, GenerationError> {
        let moc = MocCompiler::locate(self.config.moc_path.as_deref())?;
        let output = moc.compile(
            &self.config.cpp_path(),
            &self.config.moc_output_path(),
            self.config.target_dir(),
        )?;
        Ok(output)
    }

    pub fn run_fmt(&self) -> Result<String, GenerationError> {
        let output = GoFormatter::locate()?.format(self.config.target_dir())?;
        Ok(output)
    }

    /// The whole pipeline: scan, build, emit, write, then `moc` and `go fmt`.
    ///
    /// Nothing is written when no struct was discovered, or on a dry run.
    pub fn generate(&self) -> Result<GenerationReport, GenerationError> {
        let model = self.build_model()?;
        let mut report = GenerationReport {
            classes: model.classes().map(|c| c.name.clone()).collect(),
            pruned: model.resolution.pruned.clone(),
            unmapped: model.unmapped,
            ..GenerationReport::default()
        };

        if model.discovered.is_empty() {
            tracing::event!(
                tracing::Level::INFO,
                "No classes found in {}, nothing to generate",
                self.config.target_dir().display()
            );
            return Ok(report);
        }

        let artifacts = self.emit(&model)?;
        if self.config.dry_run {
            tracing::event!(
                tracing::Level::INFO,
                "Dry run: {} classes, nothing written",
                report.classes.len()
            );
            return Ok(report);
        }

        report.written = self.write_artifacts(&artifacts)?;

        if self.config.skip_moc {
            tracing::event!(tracing::Level::DEBUG, "Skipping moc");
        } else {
            report.moc_output = Some(self.run_moc()?);
        }

        if self.config.skip_fmt {
            tracing::event!(tracing::Level::DEBUG, "Skipping go fmt");
        } else {
            self.run_fmt()?;
        }

        tracing::event!(
            tracing::Level::INFO,
            "Generated {} classes into {}",
            report.classes.len(),
            self.config.target_dir().display()
        );
        Ok(report)
    }
}

/// First package clause among the scanned files.
fn package_of(files: &[ScannedFile]) -> String {
    let mut packages = files.iter().filter_map(|f| f.source.package.as_deref());
    let Some(first) = packages.next() else {
        return DEFAULT_PACKAGE.to_string();
    };
    for other in packages.filter(|p| *p != first) {
        tracing::warn!("Mixed packages {} and {}, using {}", first, other, first);
    }
    first.to_string()
}
