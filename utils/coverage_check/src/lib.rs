//! # coverage-check
//!
//! Narrows an LLVM source-based coverage report to one component.
//!
//! Each component lives in a build directory named after it, holding the
//! instrumented executable of the same name and the `default.profraw` it
//! wrote. The component's header is `<Name>/<name-lowercased>.h`.
//!
//! ```bash
//! coverage-check build/Deque           # filtered llvm-cov report
//! coverage-check build/Deque --show    # plus annotated deque.h
//! ```
//!
//! The check runs, in order:
//! 1. `llvm-profdata merge -o out.profdata <dir>/default.profraw`
//! 2. `llvm-cov report <dir>/<Name> --instr-profile=out.profdata`
//! 3. `llvm-cov show <dir>/<Name> --instr-profile=out.profdata` (with `--show`)
//!
//! then deletes `out.profdata` and prints the header row, borders, the
//! component header's row and the totals row.
//!
//! ## Environment Variables
//!
//! - `LLVM_PROFDATA`, `LLVM_COV`: explicit tool paths
//! - `RUSTUP_HOME`: where to look for rustup's `llvm-tools`
//! - `RUST_LOG`: log filter (logs go to stderr, default `warn`)

pub mod cli;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod runner;
pub mod toolchains;

pub use cli::{parse_args, Invocation, UsageError};
pub use error::{ToolError, ToolResult};
pub use pipeline::CoverageCheck;
pub use runner::{ProcessRunner, ToolOutput, ToolRunner};
pub use toolchains::{detect_toolchain, LlvmToolchain, ToolchainSource};
