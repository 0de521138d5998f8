//! word-extractor CLI.
//!
//! Logging: set `RUST_LOG=word_extractor=debug` (or pass `--verbose`) to see
//! per-document and per-stage logs on stderr.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "word_extractor=debug"
        } else {
            "word_extractor=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let (config, spec) = cli.resolve().context("failed to load configuration")?;
    if !cli.has_folder(spec.as_ref()) {
        bail!("no input folder given; pass --folder <DIR> or set \"folder\" in --config");
    }

    let summary = word_extractor::run(&config, spec.as_ref())
        .with_context(|| format!("keyword extraction failed for {}", config.folder.display()))?;

    println!(
        "The result table is ready: {} ({} keywords from {} documents)",
        summary.output.display(),
        summary.table.len(),
        summary.table.stats.documents
    );
    Ok(())
}
