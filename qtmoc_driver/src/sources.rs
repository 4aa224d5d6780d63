//! Reading the inputs of a run: Go sources and library modules.

use std::path::{Path, PathBuf};

use qtmoc_model::LibraryModule;
use qtmoc_scan::{SourceFile, scan_source};
use walkdir::WalkDir;

use crate::error::GenerationError;

/// A Go file and its scanned declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub source: SourceFile,
}

/// `*.go` files directly inside `dir`, sorted by path.
///
/// Files whose name starts with `moc` are skipped; they are earlier output.
pub fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>, GenerationError> {
    collect_files(dir, |name| {
        name.ends_with(".go") && !name.starts_with("moc")
    })
}

fn collect_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>, GenerationError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| GenerationError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        // Symlinks are kept; a dangling one fails when read.
        if !entry.file_type().is_file() && !entry.path_is_symlink() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(&keep) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Reads and scans one file.
pub fn scan_file(path: &Path) -> Result<ScannedFile, GenerationError> {
    let text = std::fs::read_to_string(path).map_err(|source| GenerationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source = scan_source(&text).map_err(|source| GenerationError::Scan {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::event!(
        tracing::Level::DEBUG,
        "Scanned {}: {} type declarations",
        path.display(),
        source.types.len()
    );
    Ok(ScannedFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Every `*.json` module in `dir`, named after its lower-cased file stem.
pub fn load_library_dir(dir: &Path) -> Result<Vec<LibraryModule>, GenerationError> {
    let mut modules = Vec::new();
    for path in collect_files(dir, |name| name.ends_with(".json"))? {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_lowercase();
        let text = std::fs::read_to_string(&path).map_err(|source| GenerationError::Read {
            path: path.clone(),
            source,
        })?;
        let mut module = LibraryModule::from_json(&stem, &text)?;
        module.name = stem;

        tracing::event!(
            tracing::Level::DEBUG,
            "Loaded library module {} with {} classes from {}",
            module.name,
            module.classes.len(),
            path.display()
        );
        modules.push(module);
    }
    Ok(modules)
}
