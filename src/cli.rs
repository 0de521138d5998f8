//! Command-line arguments.
//!
//! Flag names keep their underscore spelling (`--num_of_keywords`) so
//! existing invocations keep working.

use std::path::PathBuf;

use clap::Parser;

use word_extractor::pipeline::spec::parse_delimiter;
use word_extractor::{ConfigSpec, ExtractorConfig, OutputFormat, RankScope, Result};

#[derive(Debug, Parser)]
#[command(
    name = "word-extractor",
    version,
    about = "Extract the most frequent keywords from a folder of text files"
)]
pub struct Cli {
    /// Folder containing the documents
    #[arg(long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Stop-word language (en, de, fr, es, ...)
    #[arg(long)]
    pub lang: Option<String>,

    /// Keywords selected per document (or globally with --scope global)
    #[arg(long = "num_of_keywords", value_name = "N")]
    pub num_of_keywords: Option<usize>,

    /// Maximum number of rows in the output table
    #[arg(long = "keyword_limit_in_final_table", value_name = "N")]
    pub keyword_limit_in_final_table: Option<usize>,

    /// Drop keywords seen fewer than N times overall
    #[arg(long = "min_count", value_name = "N")]
    pub min_count: Option<usize>,

    /// Where top-N selection applies: per-document or global
    #[arg(long)]
    pub scope: Option<RankScope>,

    /// Output file [default: key_words_extracted.csv, .tsv or .json]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format: csv, tsv or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// CSV field delimiter (a single character, or \t)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Extension of the files to read
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Also read documents in subfolders
    #[arg(long)]
    pub recursive: bool,

    /// Word to exclude from the keywords (repeatable)
    #[arg(long, value_name = "WORD")]
    pub blacklist: Vec<String>,

    /// Also exclude common filler words (year, time, thing, ...)
    #[arg(long = "filter_filler_words")]
    pub filter_filler_words: bool,

    /// Multi-word phrase counted as a single keyword (repeatable)
    #[arg(long = "compound", value_name = "PHRASE")]
    pub compounds: Vec<String>,

    /// Add a column with the text of every matched sentence
    #[arg(long = "with_sentences")]
    pub with_sentences: bool,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Resolve defaults, the configuration file, then flags, in that order.
    pub fn resolve(&self) -> Result<(ExtractorConfig, Option<ConfigSpec>)> {
        let spec = self
            .config
            .as_deref()
            .map(ConfigSpec::from_file)
            .transpose()?;

        let mut cfg = ExtractorConfig::default();
        if let Some(spec) = &spec {
            spec.apply(&mut cfg);
        }
        self.apply(&mut cfg);
        Ok((cfg, spec))
    }

    /// Whether an input folder was given by flag or configuration file.
    pub fn has_folder(&self, spec: Option<&ConfigSpec>) -> bool {
        self.folder.is_some() || spec.is_some_and(|s| s.folder.is_some())
    }

    fn apply(&self, cfg: &mut ExtractorConfig) {
        if let Some(folder) = &self.folder {
            cfg.folder = folder.clone();
        }
        if let Some(lang) = &self.lang {
            cfg.language = lang.clone();
        }
        if let Some(n) = self.num_of_keywords {
            cfg.num_of_keywords = n;
        }
        if let Some(n) = self.keyword_limit_in_final_table {
            cfg.keyword_limit_in_final_table = n;
        }
        if let Some(n) = self.min_count {
            cfg.min_count = n;
        }
        if let Some(scope) = self.scope {
            cfg.scope = scope;
        }
        if let Some(ext) = &self.extension {
            cfg.extension = ext.clone();
        }
        if self.recursive {
            cfg.recursive = true;
        }
        if self.filter_filler_words {
            cfg.filter_filler_words = true;
        }
        cfg.blacklist.extend(self.blacklist.iter().cloned());
        cfg.compounds.extend(self.compounds.iter().cloned());

        if let Some(path) = &self.output {
            cfg.output.path = Some(path.clone());
        }
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
        if let Some(delimiter) = self.delimiter {
            cfg.output.delimiter = delimiter;
        }
        if self.with_sentences {
            cfg.output.include_sentences = true;
        }
    }
}
