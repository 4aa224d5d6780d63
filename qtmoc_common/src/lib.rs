//! Common utilities and shared types for the qtmoc workspace.
//!
//! This crate provides the generation configuration and the wrappers around
//! the external tools (Qt's `moc` and `go fmt`) that the driver invokes once
//! the artifacts are written.

mod config;
mod tool;

pub use crate::config::*;
pub use crate::tool::*;
