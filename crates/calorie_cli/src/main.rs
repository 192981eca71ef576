//! Interactive calorie tracker shell.
//!
//! # Responsibility
//! - Parse process arguments and start core logging.
//! - Drive one in-memory tracking session from stdin.

mod shell;

use anyhow::{anyhow, Result};
use calorie_core::{core_version, default_log_level, init_logging, LogTarget, UuidGenerator};
use clap::Parser;
use shell::{run, Shell};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "calorie", version, about = "Track food and exercise calories in memory")]
struct Args {
    /// trace|debug|info|warn|error
    #[arg(long, env = "CALORIE_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rotating log files; logs go to stderr when unset.
    #[arg(long, env = "CALORIE_LOG_DIR")]
    log_dir: Option<String>,
    /// Do not print the prompt (for piped scripts).
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let target = match args.log_dir.as_deref() {
        Some(dir) => LogTarget::directory(dir).map_err(|err| anyhow!(err))?,
        None => LogTarget::Stderr,
    };
    // Stderr shares the terminal with the shell, so it only gets warnings.
    let level = match (&args.log_level, &target) {
        (Some(level), _) => level.as_str(),
        (None, LogTarget::Stderr) => "warn",
        (None, LogTarget::Directory(_)) => default_log_level(),
    };
    init_logging(level, target).map_err(|err| anyhow!(err))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let prompt = !args.quiet;
    if prompt {
        writeln!(out, "calorie tracker {} (type `help`)", core_version())?;
        write!(out, "> ")?;
        out.flush()?;
    }

    let mut shell = Shell::new(UuidGenerator);
    run(&mut shell, stdin.lock(), &mut out, prompt)
}
