//! Table writers
//!
//! [`TableWriter`] is the formatting boundary: everything before it works on
//! interned terms and document structures, everything after is bytes.

pub mod csv;
pub mod json;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

use crate::errors::{ExtractError, Result};
use crate::types::{KeywordTable, OutputConfig, OutputFormat};

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;

/// Serializes a [`KeywordTable`] to a byte sink.
pub trait TableWriter {
    fn write_table(&self, table: &KeywordTable, out: &mut dyn Write) -> io::Result<()>;
}

/// Build the writer selected by `cfg`.
pub fn writer_for(cfg: &OutputConfig) -> Box<dyn TableWriter> {
    match cfg.format {
        OutputFormat::Csv => Box::new(
            CsvWriter::new()
                .with_delimiter(cfg.delimiter)
                .with_sentences(cfg.include_sentences),
        ),
        OutputFormat::Tsv => Box::new(
            CsvWriter::new()
                .with_delimiter('\t')
                .with_sentences(cfg.include_sentences),
        ),
        OutputFormat::Json => Box::new(JsonWriter),
    }
}

/// Write `table` to the configured output file and return its path.
pub fn write_table(table: &KeywordTable, cfg: &OutputConfig) -> Result<PathBuf> {
    let path = cfg.resolved_path();
    let write_err = |source| ExtractError::Write {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    writer_for(cfg)
        .write_table(table, &mut out)
        .map_err(write_err)?;

    info!(path = %path.display(), rows = table.len(), "wrote keyword table");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_table_creates_file() {
        let dir = TempDir::new().unwrap();
        let cfg = OutputConfig {
            path: Some(dir.path().join("out.csv")),
            ..Default::default()
        };

        let path = write_table(&KeywordTable::default(), &cfg).unwrap();

        assert_eq!(path, dir.path().join("out.csv"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "rank,keyword,frequency,documents,locations\n");
    }

    #[test]
    fn test_write_table_json() {
        let dir = TempDir::new().unwrap();
        let cfg = OutputConfig {
            path: Some(dir.path().join("out.json")),
            format: OutputFormat::Json,
            ..Default::default()
        };

        let path = write_table(&KeywordTable::default(), &cfg).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(value["keywords"].is_array());
    }

    #[test]
    fn test_tsv_format_writes_tabs() {
        let dir = TempDir::new().unwrap();
        let cfg = OutputConfig {
            format: OutputFormat::Tsv,
            path: Some(dir.path().join("out.tsv")),
            ..Default::default()
        };
        assert_eq!(cfg.delimiter, ',');

        let path = write_table(&KeywordTable::default(), &cfg).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "rank\tkeyword\tfrequency\tdocuments\tlocations\n");
    }

    #[test]
    fn test_write_error_names_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("out.csv");
        let cfg = OutputConfig {
            path: Some(target.clone()),
            ..Default::default()
        };

        let err = write_table(&KeywordTable::default(), &cfg).unwrap_err();
        assert!(matches!(err, ExtractError::Write { path, .. } if path == target));
    }
}
