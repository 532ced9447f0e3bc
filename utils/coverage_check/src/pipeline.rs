//! Step sequencing: merge, report, filter, optional show, cleanup.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::cli::Invocation;
use crate::error::{ToolError, ToolResult};
use crate::filter::{extract_show, filter_report, SHOW_SEPARATOR};
use crate::runner::ToolRunner;
use crate::toolchains::{self, LlvmToolchain, PROFDATA_FILE};

/// Runs one coverage check against a single component directory.
///
/// Tool invocations and the merged profile are relative to `workdir`.
pub struct CoverageCheck<'r> {
    runner: &'r mut dyn ToolRunner,
    toolchain: LlvmToolchain,
    workdir: PathBuf,
}

impl<'r> CoverageCheck<'r> {
    pub fn new(
        runner: &'r mut dyn ToolRunner,
        toolchain: LlvmToolchain,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            toolchain,
            workdir: workdir.into(),
        }
    }

    /// Produce the text to print.
    ///
    /// Any failure aborts immediately; `out.profdata` is only removed once
    /// every tool has succeeded.
    pub fn run(&mut self, invocation: &Invocation) -> ToolResult<String> {
        toolchains::merge_profdata(&mut *self.runner, &self.toolchain, invocation)?;

        let report = toolchains::report(&mut *self.runner, &self.toolchain, invocation)?;
        let mut result = filter_report(&report, &invocation.header_path());

        if invocation.show {
            let show = toolchains::show(&mut *self.runner, &self.toolchain, invocation)?;
            result.push_str(SHOW_SEPARATOR);
            result.push_str(extract_show(&show, invocation));
        }

        self.remove_profdata()?;
        Ok(result)
    }

    fn remove_profdata(&self) -> ToolResult<()> {
        let path = self.workdir.join(PROFDATA_FILE);
        debug!(path = %path.display(), "removing merged profile");
        fs::remove_file(&path).map_err(|source| ToolError::cleanup(path, source))
    }
}
