//! `roster-import`: load a contacts spreadsheet export into the store.
//!
//! # Usage
//!
//! ```
//! roster-import companies_0_500.csv --store roster.db
//! ```

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use roster_store_sqlite::{SqliteStore, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "roster-import", about = "Bulk-load contacts from a CSV file")]
struct Args {
  /// CSV file with a header row.
  #[arg(value_name = "FILE", default_value = "companies_0_500.csv")]
  csv: PathBuf,

  /// SQLite store to write into.
  #[arg(long, env = "ROSTER_STORE_PATH", default_value = "roster.db")]
  store: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file = File::open(&args.csv).with_context(|| format!("failed to open {:?}", args.csv))?;
  let store_path = expand_tilde(&args.store);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let written = roster_import::import(BufReader::new(file), &store)
    .await
    .with_context(|| format!("failed to import {:?}", args.csv))?;

  tracing::info!(rows = written, store = %store_path.display(), "import complete");
  Ok(())
}
