use std::path::PathBuf;

use qtmoc_common::ToolError;
use qtmoc_model::ModelError;
use qtmoc_scan::ScanError;
use thiserror::Error;

use crate::emit::EmitError;

/// Coarse classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unreadable or unparsable sources and library modules.
    Input,
    /// Inconsistent class declarations.
    Model,
    /// Emission, writing artifacts or running `moc` and `go fmt`.
    Tooling,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to list {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("{}:{source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Read { .. }
            | GenerationError::Walk { .. }
            | GenerationError::Scan { .. }
            | GenerationError::Model(ModelError::Library { .. }) => ErrorKind::Input,
            GenerationError::Model(ModelError::DuplicateClass { .. }) => ErrorKind::Model,
            GenerationError::Emit(_) | GenerationError::Write { .. } | GenerationError::Tool(_) => {
                ErrorKind::Tooling
            }
        }
    }

    /// Output captured from a failing external tool.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            GenerationError::Tool(err) => err.output(),
            _ => None,
        }
    }
}
