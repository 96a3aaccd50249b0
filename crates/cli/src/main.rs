//! Character sheet entry point.
//!
//! Loads rule tables, engine configuration and one host actor document, runs
//! the derived-stat pipeline and prints the result as JSON on stdout. Logs go
//! to stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sw5e_content::ContentFactory;
use sw5e_core::DerivedStatsEngine;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Compute derived stats for a host actor document
#[derive(Parser, Debug)]
#[command(name = "sw5e-sheet")]
#[command(about = "Compute SW5e derived stats for an actor", long_about = None)]
#[command(version)]
struct Cli {
    /// Actor document (JSON). Relative paths also resolve against `<DATA_DIR>/actors`
    #[arg(value_name = "ACTOR", env = "SW5E_ACTOR")]
    actor: PathBuf,

    /// Directory holding config.toml and tables.toml
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "SW5E_DATA_DIR",
        default_value = "crates/game/content/data"
    )]
    data_dir: PathBuf,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Include the snapshot fingerprint alongside the stats
    #[arg(short, long)]
    fingerprint: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging();

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

/// Stderr logging, `info` unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let factory = ContentFactory::new(&cli.data_dir);
    tracing::debug!(data_dir = %factory.data_dir().display(), "loading content");
    let config = factory.load_config()?;
    let tables = factory.load_tables()?;
    let actor = factory.load_actor(&cli.actor)?;

    let engine = DerivedStatsEngine::new(&tables, &config);
    let stats = engine.recompute(&actor);
    tracing::info!(
        actor = %cli.actor.display(),
        kind = %actor.kind,
        level = stats.level.level,
        diagnostics = stats.diagnostics.len(),
        "derived stats computed"
    );

    let document = if cli.fingerprint {
        serde_json::json!({
            "fingerprint": hex::encode(actor.fingerprint()),
            "stats": stats,
        })
    } else {
        serde_json::to_value(&stats)?
    };

    if cli.pretty {
        serde_json::to_writer_pretty(&mut *out, &document)
    } else {
        serde_json::to_writer(&mut *out, &document)
    }
    .context("Failed to write derived stats")?;
    writeln!(out)?;
    Ok(())
}
