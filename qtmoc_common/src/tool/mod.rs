//! External tool integration.
//!
//! Both tools run synchronously with their combined output captured; a
//! non-zero exit status is reported as [`ToolError::Failed`].

mod command;
mod gofmt;
mod moc;
mod platform;

pub use command::{ToolError, run_tool};
pub use gofmt::GoFormatter;
pub use moc::MocCompiler;
pub use platform::{default_moc_path, moc_install_path};
