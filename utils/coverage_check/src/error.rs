use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Failure of an external LLVM tool or of the profile cleanup.
///
/// None of these are recovered from; they surface at the process boundary.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("{tool} {step} exited with {status}{}", render_stdout(.stdout))]
    Failed {
        tool: String,
        step: &'static str,
        status: ExitStatus,
        stdout: String,
    },
    #[error("failed to remove {path:?}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ToolResult<T> = Result<T, ToolError>;

impl ToolError {
    pub fn spawn(tool: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            tool: tool.into(),
            source,
        }
    }

    pub fn cleanup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Cleanup {
            path: path.into(),
            source,
        }
    }
}

fn render_stdout(stdout: &str) -> String {
    let trimmed = stdout.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
