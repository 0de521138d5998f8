//! # word-extractor
//!
//! Scans a folder of text documents, picks the most frequent non-stop-word
//! tokens of each document, and writes a table of keywords with their
//! frequency and the (document, sentence) locations where they occur.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use word_extractor::{run, ExtractorConfig};
//!
//! let config = ExtractorConfig {
//!     folder: "articles".into(),
//!     num_of_keywords: 5,
//!     keyword_limit_in_final_table: 20,
//!     ..Default::default()
//! };
//! let summary = run(&config, None).unwrap();
//! println!("{} keywords -> {}", summary.table.len(), summary.output.display());
//! ```
//!
//! ## Stages
//!
//! load → preprocess → split sentences and words → filter stop words →
//! count → rank → index occurrences → write.

pub mod errors;
pub mod loader;
pub mod nlp;
pub mod occurrence;
pub mod output;
pub mod pipeline;
pub mod rank;
pub mod types;

use std::path::PathBuf;

pub use errors::{ExtractError, Result};
pub use pipeline::{ConfigSpec, Pipeline};
pub use types::{
    ExtractorConfig, KeywordRecord, KeywordTable, Location, OutputConfig, OutputFormat, RankScope,
};

use pipeline::{ensure_valid, TracingObserver};

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub table: KeywordTable,
    /// File the table was written to
    pub output: PathBuf,
}

/// Validate `config` and extract the keyword table without writing it.
///
/// `spec` is the configuration file the settings came from, if any; it is
/// only used to report unknown fields and version problems.
pub fn extract_keywords(config: &ExtractorConfig, spec: Option<&ConfigSpec>) -> Result<KeywordTable> {
    ensure_valid(config, spec)?;
    let pipeline = Pipeline::from_config(config.clone())?;
    pipeline.run(&mut TracingObserver)
}

/// Extract the keyword table and write it to the configured output.
pub fn run(config: &ExtractorConfig, spec: Option<&ConfigSpec>) -> Result<RunSummary> {
    let table = extract_keywords(config, spec)?;
    let output = output::write_table(&table, &config.output)?;
    Ok(RunSummary { table, output })
}
