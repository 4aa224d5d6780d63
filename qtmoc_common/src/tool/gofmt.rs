use std::path::{Path, PathBuf};
use std::process::Command;

use crate::tool::command::{ToolError, run_tool};

/// The `go fmt` pass over the generated glue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFormatter {
    go: PathBuf,
}

impl GoFormatter {
    pub fn locate() -> Result<Self, ToolError> {
        let go = which::which("go").map_err(|e| ToolError::NotFound {
            tool: "go".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { go })
    }

    pub fn with_go<P: Into<PathBuf>>(go: P) -> Self {
        Self { go: go.into() }
    }

    pub fn go(&self) -> &Path {
        &self.go
    }

    pub fn format(&self, dir: &Path) -> Result<String, ToolError> {
        let mut cmd = Command::new(&self.go);
        cmd.arg("fmt").current_dir(dir);
        run_tool(&mut cmd, "moc.fmt")
    }
}
