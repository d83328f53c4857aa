use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use authors::AuthorsTable;
use command::{fix, validate};

mod authors;
mod command;

/// Validate or fix authors.yaml sorting (case-insensitive alphabetical).
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Sort the file instead of just validating
    #[clap(long)]
    fix: bool,

    /// Authors file [default: authors.yaml at the repository root]
    #[clap(short, long)]
    file: Option<PathBuf>,

    #[clap(short, long, global = true)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let path = match cli.file {
        Some(path) => path,
        None => authors::locate(&std::env::current_dir()?),
    };
    debug!(path = %path.display(), "Using authors file");
    let table = AuthorsTable::load(&path)?;
    let name = display_name(&path);
    let mut stdout = std::io::stdout().lock();

    let outcome = if cli.fix {
        fix::run(&table, &path, &name, &mut stdout)?
    } else {
        validate::run(&table, &name, &mut stdout)?
    };
    Ok(outcome.exit_code())
}

/// Messages name the file, not the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
