//! Generation pipeline for Go types that declare Qt signals and slots.
//!
//! The [`Driver`] reads the Go files of a target directory, builds and
//! resolves their class model, renders `moc.cpp`, `moc.h` and `moc.go`
//! through an [`Emitter`], and runs `moc` and `go fmt` over the result.

pub mod driver;
pub mod emit;
mod error;
pub mod sources;

pub use driver::{ClassModel, DEFAULT_PACKAGE, Driver, GenerationReport};
pub use emit::{Artifacts, EmitContext, EmitError, Emitter, TemplateEmitter};
pub use error::{ErrorKind, GenerationError};
pub use sources::{ScannedFile, collect_sources, load_library_dir, scan_file};
