//! Argument resolution for `coverage-check <dir> [--show]`.
//!
//! The grammar is positional and order sensitive: the first argument is always
//! the component directory, and the remaining tokens are scanned left to right
//! until the first `-h` or unrecognized token. Every failure exits with
//! status 2, including `-h`.

use thiserror::Error;

pub const PROGRAM: &str = "coverage-check";
pub const USAGE: &str = "coverage-check <dir> [--show]";

/// Status used for every usage outcome, `-h` included.
pub const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("missing component directory")]
    Missing,
    #[error("unrecognized argument: {0}")]
    BadArgument(String),
    #[error("help requested")]
    Help,
}

impl UsageError {
    /// Text printed to stdout before exiting.
    pub fn message(&self) -> String {
        match self {
            Self::Help => USAGE.to_string(),
            Self::Missing | Self::BadArgument(_) => format!("Bad argument.\n{USAGE}"),
        }
    }
}

/// Resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Component directory with one trailing `/` removed.
    pub dir: String,
    /// Last path segment of `dir`; names both the executable and the header.
    pub name: String,
    pub show: bool,
}

impl Invocation {
    pub fn new(dir: &str, show: bool) -> Self {
        let dir = dir.strip_suffix('/').unwrap_or(dir).to_string();
        let name = match dir.rfind('/') {
            Some(idx) => dir[idx + 1..].to_string(),
            None => dir.clone(),
        };
        Self { dir, name, show }
    }

    /// Header path as rendered by `llvm-cov report`, e.g. `Deque/deque.h`.
    pub fn header_path(&self) -> String {
        format!("{}/{}.h", self.name, self.name.to_lowercase())
    }

    /// Instrumented executable: `<dir>/<name>`.
    pub fn executable(&self) -> String {
        format!("{}/{}", self.dir, self.name)
    }

    /// Raw profile written by the instrumented executable.
    pub fn profraw(&self) -> String {
        format!("{}/default.profraw", self.dir)
    }
}

/// Resolve the arguments that follow the program name.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let dir = args.next().ok_or(UsageError::Missing)?;
    let dir = dir.as_ref();
    if dir.is_empty() {
        return Err(UsageError::Missing);
    }

    let mut show = false;
    for arg in args {
        match arg.as_ref() {
            "--show" => show = true,
            "-h" => return Err(UsageError::Help),
            other => return Err(UsageError::BadArgument(other.to_string())),
        }
    }

    Ok(Invocation::new(dir, show))
}
