//! Toolchain detection and invocation of the LLVM coverage tools
//!
//! Tools are resolved in this order:
//! - `LLVM_PROFDATA` / `LLVM_COV` environment overrides
//! - System `PATH`
//! - Homebrew LLVM
//! - rustup's bundled `llvm-tools`
//!
//! If none of these has the tool, the bare name is kept so the later
//! invocation fails with a launch error naming it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::Invocation;
use crate::error::ToolResult;
use crate::runner::{ToolOutput, ToolRunner};

/// Merged profile written to the working directory and removed on success.
pub const PROFDATA_FILE: &str = "out.profdata";

pub const PROFDATA_TOOL: &str = "llvm-profdata";
pub const COV_TOOL: &str = "llvm-cov";

const PROFDATA_ENV: &str = "LLVM_PROFDATA";
const COV_ENV: &str = "LLVM_COV";

const HOMEBREW_PATHS: &[&str] = &[
    "/opt/homebrew/opt/llvm/bin", // ARM64 Macs
    "/usr/local/opt/llvm/bin",    // Intel Macs
];

/// Represents the detected LLVM toolchain
#[derive(Debug, Clone)]
pub struct LlvmToolchain {
    pub profdata: PathBuf,
    pub cov: PathBuf,
    pub source: ToolchainSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolchainSource {
    Environment, // LLVM_PROFDATA / LLVM_COV
    System,      // Found on PATH
    Homebrew,    // Homebrew-installed LLVM
    Rustup,      // Rust's bundled LLVM tools
    Unresolved,  // Bare names, left to fail at launch
}

impl std::fmt::Display for ToolchainSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment override"),
            Self::System => write!(f, "System LLVM"),
            Self::Homebrew => write!(f, "Homebrew LLVM"),
            Self::Rustup => write!(f, "Rust toolchain (rustup)"),
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Detect the toolchain from the process environment.
pub fn detect_toolchain() -> LlvmToolchain {
    detect_toolchain_with(|key| std::env::var(key).ok())
}

/// Detect the toolchain with an explicit environment lookup.
pub fn detect_toolchain_with<F>(env: F) -> LlvmToolchain
where
    F: Fn(&str) -> Option<String>,
{
    let toolchain = match (non_empty(&env, PROFDATA_ENV), non_empty(&env, COV_ENV)) {
        (Some(profdata), Some(cov)) => LlvmToolchain {
            profdata: PathBuf::from(profdata),
            cov: PathBuf::from(cov),
            source: ToolchainSource::Environment,
        },
        (profdata, cov) => {
            let mut found = detect_installed(&env);
            if let Some(profdata) = profdata {
                found.profdata = PathBuf::from(profdata);
                found.source = ToolchainSource::Environment;
            }
            if let Some(cov) = cov {
                found.cov = PathBuf::from(cov);
                found.source = ToolchainSource::Environment;
            }
            found
        }
    };

    debug!(
        profdata = %toolchain.profdata.display(),
        cov = %toolchain.cov.display(),
        "using {}",
        toolchain.source
    );
    toolchain
}

fn non_empty<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).filter(|value| !value.is_empty())
}

fn detect_installed<F>(env: &F) -> LlvmToolchain
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(toolchain) = detect_system_toolchain() {
        return toolchain;
    }

    let homebrew = HOMEBREW_PATHS.iter().map(PathBuf::from).collect::<Vec<_>>();
    if let Some(toolchain) = detect_in_dirs(&homebrew, ToolchainSource::Homebrew) {
        return toolchain;
    }

    if let Some(rustup_home) = rustup_home(env) {
        if let Some(toolchain) = detect_rustup_toolchain(&rustup_home) {
            return toolchain;
        }
    }

    LlvmToolchain {
        profdata: PathBuf::from(PROFDATA_TOOL),
        cov: PathBuf::from(COV_TOOL),
        source: ToolchainSource::Unresolved,
    }
}

/// Detect system-installed LLVM toolchain
fn detect_system_toolchain() -> Option<LlvmToolchain> {
    let profdata = which::which(PROFDATA_TOOL).ok()?;
    let cov = which::which(COV_TOOL).ok()?;

    Some(LlvmToolchain {
        profdata,
        cov,
        source: ToolchainSource::System,
    })
}

/// First directory holding both tools.
fn detect_in_dirs(dirs: &[PathBuf], source: ToolchainSource) -> Option<LlvmToolchain> {
    dirs.iter().find_map(|dir| {
        let profdata = dir.join(PROFDATA_TOOL);
        let cov = dir.join(COV_TOOL);
        (profdata.exists() && cov.exists()).then(|| LlvmToolchain {
            profdata,
            cov,
            source: source.clone(),
        })
    })
}

fn rustup_home<F>(env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(env, "RUSTUP_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty(env, "HOME").map(|home| Path::new(&home).join(".rustup")))
}

/// Look for `llvm-tools` in any installed rustup toolchain.
fn detect_rustup_toolchain(rustup_home: &Path) -> Option<LlvmToolchain> {
    let pattern = format!(
        "{}/toolchains/*/lib/rustlib/*/bin",
        rustup_home.display()
    );
    let dirs = glob::glob(&pattern)
        .ok()?
        .flatten()
        .collect::<Vec<_>>();
    detect_in_dirs(&dirs, ToolchainSource::Rustup)
}

/// `llvm-profdata merge -o out.profdata <dir>/default.profraw`
pub fn merge_args(invocation: &Invocation) -> Vec<String> {
    vec![
        "merge".to_string(),
        "-o".to_string(),
        PROFDATA_FILE.to_string(),
        invocation.profraw(),
    ]
}

/// `llvm-cov <subcommand> <dir>/<name> --instr-profile=out.profdata`
pub fn cov_args(subcommand: &str, invocation: &Invocation) -> Vec<String> {
    vec![
        subcommand.to_string(),
        invocation.executable(),
        format!("--instr-profile={PROFDATA_FILE}"),
    ]
}

/// Run llvm-profdata merge command
pub fn merge_profdata<R: ToolRunner + ?Sized>(
    runner: &mut R,
    toolchain: &LlvmToolchain,
    invocation: &Invocation,
) -> ToolResult<()> {
    runner.run(&toolchain.profdata, &merge_args(invocation), "merge")?;
    Ok(())
}

/// Run llvm-cov report and return its text
pub fn report<R: ToolRunner + ?Sized>(
    runner: &mut R,
    toolchain: &LlvmToolchain,
    invocation: &Invocation,
) -> ToolResult<String> {
    let ToolOutput { stdout } =
        runner.run(&toolchain.cov, &cov_args("report", invocation), "report")?;
    Ok(stdout)
}

/// Run llvm-cov show and return the annotated sources
pub fn show<R: ToolRunner + ?Sized>(
    runner: &mut R,
    toolchain: &LlvmToolchain,
    invocation: &Invocation,
) -> ToolResult<String> {
    let ToolOutput { stdout } =
        runner.run(&toolchain.cov, &cov_args("show", invocation), "show")?;
    Ok(stdout)
}
