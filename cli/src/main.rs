//! fx - window a sorted numeric stream from the command line.
//!
//! ```text
//! stdin | --input ──> input::values ──> fx_core::{window_diffs, windows} ──> render ──> stdout
//!                         │
//!                         └── first bad line parked in InputFailure, reported after the last record
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `warn`) so stdout stays parseable.

mod input;
mod render;
mod settings;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fx_config::FxConfig;
use fx_core::SortedIterExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::input::InputFailure;
use crate::settings::{Settings, WindowArgs};

#[derive(Parser)]
#[command(name = "fx")]
#[command(about = "Window sorted numeric streams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full contents of every window
    Windows(Invocation),
    /// Print each window as a diff against the previous one
    Diffs(Invocation),
}

#[derive(clap::Args)]
struct Invocation {
    #[command(flatten)]
    window: WindowArgs,
    /// Read values from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(env_filter)
        .init();
}

fn load_config() -> Option<FxConfig> {
    match FxConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "{err}; using defaults");
            None
        }
    }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn run(command: Commands) -> Result<()> {
    let (invocation, as_diffs) = match command {
        Commands::Windows(invocation) => (invocation, false),
        Commands::Diffs(invocation) => (invocation, true),
    };

    let config = load_config();
    let settings = Settings::resolve(invocation.window, config.as_ref())?;
    let reader = open_input(invocation.input.as_deref())?;

    let failure = InputFailure::default();
    let values = input::values(reader, &failure);
    let mut out = BufWriter::new(io::stdout().lock());

    // A record produced after the input failed only reflects the truncated
    // stream, so it is dropped.
    if as_diffs {
        for record in values.window_diffs(|v| *v, settings.spec) {
            if failure.is_set() {
                break;
            }
            render::write_record(&mut out, &record, settings.format)?;
        }
    } else {
        for snapshot in values.windows(|v| *v, settings.spec) {
            if failure.is_set() {
                break;
            }
            render::write_record(&mut out, &snapshot, settings.format)?;
        }
    }
    out.flush().context("failed to write output")?;

    match failure.take() {
        Some(err) => Err(err).context("input rejected"),
        None => Ok(()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse().command)
}
