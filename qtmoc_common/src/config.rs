//! Configuration for a single generation run.

use std::path::{Path, PathBuf};

/// Name of the generated native source file.
pub const MOC_CPP: &str = "moc.cpp";
/// Name of the generated native header.
pub const MOC_H: &str = "moc.h";
/// Name of the generated Go glue file.
pub const MOC_GO: &str = "moc.go";
/// Name of the file `moc` writes its metadata into.
pub const MOC_OUTPUT: &str = "moc_moc.h";

/// Options for one run of the generator over a target directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MocConfig {
    /// Directory holding the Go sources; artifacts are written here.
    pub target_dir: PathBuf,
    /// Explicit path to the `moc` binary, bypassing platform detection.
    pub moc_path: Option<PathBuf>,
    /// Directory of additional `*.json` library modules.
    pub library_dir: Option<PathBuf>,
    /// Do not invoke `moc` after writing the artifacts.
    pub skip_moc: bool,
    /// Do not run `go fmt` over the glue file.
    pub skip_fmt: bool,
    /// Build the class model but write nothing.
    pub dry_run: bool,
    /// pkg-config packages referenced by the cgo preamble of the glue file.
    pub pkg_config: Vec<String>,
}

impl MocConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_dir<P: Into<PathBuf>>(mut self, target_dir: P) -> Self {
        self.target_dir = target_dir.into();
        self
    }

    pub fn with_moc_path<P: Into<PathBuf>>(mut self, moc_path: P) -> Self {
        self.moc_path = Some(moc_path.into());
        self
    }

    pub fn with_library_dir<P: Into<PathBuf>>(mut self, library_dir: P) -> Self {
        self.library_dir = Some(library_dir.into());
        self
    }

    pub fn with_skip_moc(mut self, skip_moc: bool) -> Self {
        self.skip_moc = skip_moc;
        self
    }

    pub fn with_skip_fmt(mut self, skip_fmt: bool) -> Self {
        self.skip_fmt = skip_fmt;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_pkg_config(mut self, package: &str) -> Self {
        if !self.pkg_config.iter().any(|p| p == package) {
            self.pkg_config.push(package.to_string());
        }
        self
    }

    /// Packages for the cgo preamble, falling back to `Qt5Core`.
    pub fn pkg_config_packages(&self) -> Vec<String> {
        if self.pkg_config.is_empty() {
            vec!["Qt5Core".to_string()]
        } else {
            self.pkg_config.clone()
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn cpp_path(&self) -> PathBuf {
        self.target_dir.join(MOC_CPP)
    }

    pub fn header_path(&self) -> PathBuf {
        self.target_dir.join(MOC_H)
    }

    pub fn glue_path(&self) -> PathBuf {
        self.target_dir.join(MOC_GO)
    }

    pub fn moc_output_path(&self) -> PathBuf {
        self.target_dir.join(MOC_OUTPUT)
    }
}
