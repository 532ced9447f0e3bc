use anyhow::{Context, Result};
use coverage_check::cli::{self, USAGE_EXIT_CODE};
use coverage_check::{detect_toolchain, CoverageCheck, ProcessRunner};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Logs stay on stderr; stdout carries only the filtered report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let invocation = match cli::parse_args(args) {
        Ok(invocation) => invocation,
        Err(usage) => {
            tracing::debug!("{usage}");
            println!("{}", usage.message());
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    let workdir = std::env::current_dir().context("Failed to resolve working directory")?;
    let mut runner = ProcessRunner::new(&workdir);
    let output = CoverageCheck::new(&mut runner, detect_toolchain(), &workdir)
        .run(&invocation)
        .with_context(|| format!("Coverage check failed for {}", invocation.dir))?;

    println!("{output}");
    Ok(())
}
