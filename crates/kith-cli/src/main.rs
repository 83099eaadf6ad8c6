//! `kith`: command-line front end for the Kith contact book.
//!
//! # Usage
//!
//! ```text
//! kith add --name "Ada Lovelace" --phone "+44 20 7946 0958"
//! kith list ada --by all
//! kith --data-file ./contacts.json export
//! ```

mod commands;
mod render;
mod settings;

#[cfg(test)]
mod tests;

use std::{
  io::{self, BufRead, Write},
  path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use kith_core::store::{ContactStore, Loaded};
use kith_store_json::JsonFileBackend;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::Command;
use settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "kith", version, about = "Manage a local contact book")]
struct Args {
  /// Path to a TOML config file (default: ~/.config/kith/config.toml).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Contact data file; overrides the config file and `KITH_DATA_FILE`.
  #[arg(long, value_name = "FILE", global = true)]
  data_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr so command output stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();
  let settings = Settings::load(args.config.as_deref(), args.data_file.as_deref())?;

  let backend = match JsonFileBackend::open(&settings.data_file) {
    Ok(backend) => backend,
    Err(e) => {
      tracing::warn!(
        path = %settings.data_file.display(),
        error = %e,
        "could not create contact file"
      );
      JsonFileBackend::new(&settings.data_file)
    }
  };

  let Loaded { mut store, warning } = ContactStore::load(backend);
  if let Some(warning) = warning {
    eprintln!("warning: {warning}; starting with an empty contact list");
  }

  let stdout = io::stdout();
  let mut out = stdout.lock();
  commands::run(&mut store, args.command, &mut out, &mut ask)
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` means no.
fn ask(question: &str) -> io::Result<bool> {
  let mut stderr = io::stderr();
  write!(stderr, "{question} [y/N] ")?;
  stderr.flush()?;

  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let answer = line.trim().to_ascii_lowercase();
  Ok(answer == "y" || answer == "yes")
}
