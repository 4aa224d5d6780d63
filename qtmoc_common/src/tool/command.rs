use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to find {tool} binary: {reason}")]
    NotFound { tool: String, reason: String },
    #[error("IO error while running {label}: {source}")]
    Io {
        label: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{label} failed: status={status}\noutput:{output}")]
    Failed {
        label: String,
        status: String,
        output: String,
    },
}

impl ToolError {
    /// Captured output of a failed invocation, if the tool ran at all.
    pub fn output(&self) -> Option<&str> {
        match self {
            ToolError::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Runs `cmd` to completion and returns its stdout followed by its stderr.
#[contracts::debug_requires(!label.is_empty())]
pub fn run_tool(cmd: &mut Command, label: &str) -> Result<String, ToolError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::event!(tracing::Level::DEBUG, "Running {}: {:?}", label, cmd);

    // Use `output()` to read both stdout and stderr concurrently.
    let output = cmd.output().map_err(|source| ToolError::Io {
        label: label.to_string(),
        source,
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        tracing::event!(
            tracing::Level::ERROR,
            "{} failed: status={:?}\n{}",
            label,
            output.status,
            combined,
        );
        return Err(ToolError::Failed {
            label: label.to_string(),
            status: output.status.to_string(),
            output: combined,
        });
    }

    Ok(combined)
}
