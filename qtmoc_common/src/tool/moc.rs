use std::path::{Path, PathBuf};
use std::process::Command;

use crate::tool::command::{ToolError, run_tool};
use crate::tool::platform::default_moc_path;

/// Qt's meta-object compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MocCompiler {
    path: PathBuf,
}

impl MocCompiler {
    /// Finds `moc`: an explicit override first, then the platform install
    /// path, then `PATH`.
    pub fn locate(override_path: Option<&Path>) -> Result<Self, ToolError> {
        if let Some(path) = override_path {
            return Self::with_path(path);
        }

        if let Some(path) = default_moc_path().filter(|p| p.exists()) {
            return Ok(Self { path });
        }

        let path = which::which("moc").map_err(|e| ToolError::NotFound {
            tool: "moc".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self, ToolError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ToolError::NotFound {
                tool: "moc".to_string(),
                reason: format!("moc binary not found at: {}", path.display()),
            });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn build_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ]
    }

    /// Runs `moc input -o output` inside `workdir`.
    pub fn compile(&self, input: &Path, output: &Path, workdir: &Path) -> Result<String, ToolError> {
        let mut cmd = Command::new(&self.path);
        cmd.args(self.build_args(input, output)).current_dir(workdir);
        run_tool(&mut cmd, "moc.moc")
    }
}
