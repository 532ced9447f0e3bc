//! Synchronous execution of the external LLVM tools.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{ToolError, ToolResult};

/// Captured result of a successful tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
}

/// One blocking invocation of an external program.
///
/// `step` names the subcommand for error reporting. Implementations must
/// return [`ToolError::Failed`] on a non-zero exit.
pub trait ToolRunner {
    fn run(&mut self, program: &Path, args: &[String], step: &'static str)
        -> ToolResult<ToolOutput>;
}

/// Runs tools as child processes from `workdir`.
///
/// Stdout is captured; stderr is inherited so tool diagnostics reach the user
/// as-is.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    workdir: PathBuf,
}

impl ProcessRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl ToolRunner for ProcessRunner {
    fn run(
        &mut self,
        program: &Path,
        args: &[String],
        step: &'static str,
    ) -> ToolResult<ToolOutput> {
        let tool = program.display().to_string();
        debug!(tool = %tool, ?args, "running");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::spawn(tool.clone(), source))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(ToolError::Failed {
                tool,
                step,
                status: output.status,
                stdout,
            });
        }

        Ok(ToolOutput { stdout })
    }
}
