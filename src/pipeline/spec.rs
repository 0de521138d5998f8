//! Configuration file types.
//!
//! A [`ConfigSpec`] is the JSON form of an [`ExtractorConfig`]: every field
//! is optional and overrides the built-in default. Command-line flags are
//! applied on top. Unknown fields are captured so the validation engine can
//! report them.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "folder": "articles",
//!   "lang": "en",
//!   "num_of_keywords": 5,
//!   "keyword_limit_in_final_table": 20,
//!   "scope": "per_document",
//!   "compounds": ["al Qaeda"],
//!   "output": { "path": "keywords.tsv", "delimiter": "\t" },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ExtractError, Result};
use crate::types::{ExtractorConfig, OutputFormat, RankScope};

/// Current configuration file version.
pub const CONFIG_VERSION: u32 = 1;

/// Top-level configuration file (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSpec {
    /// File format version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    #[serde(default)]
    pub folder: Option<PathBuf>,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub num_of_keywords: Option<usize>,

    #[serde(default)]
    pub keyword_limit_in_final_table: Option<usize>,

    #[serde(default)]
    pub min_count: Option<usize>,

    #[serde(default)]
    pub scope: Option<RankScope>,

    #[serde(default)]
    pub extension: Option<String>,

    #[serde(default)]
    pub recursive: Option<bool>,

    #[serde(default)]
    pub min_token_length: Option<usize>,

    #[serde(default)]
    pub skip_numeric: Option<bool>,

    #[serde(default)]
    pub filter_filler_words: Option<bool>,

    /// Appended to any blacklist given on the command line.
    #[serde(default)]
    pub blacklist: Vec<String>,

    #[serde(default)]
    pub compounds: Vec<String>,

    #[serde(default)]
    pub output: OutputSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Output section of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSpec {
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Single character, or `"\\t"` / `"tab"` for tab-separated output.
    #[serde(default)]
    pub delimiter: Option<String>,

    #[serde(default)]
    pub include_sentences: Option<bool>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for ConfigSpec {
    fn default() -> Self {
        Self {
            v: CONFIG_VERSION,
            folder: None,
            lang: None,
            num_of_keywords: None,
            keyword_limit_in_final_table: None,
            min_count: None,
            scope: None,
            extension: None,
            recursive: None,
            min_token_length: None,
            skip_numeric: None,
            filter_filler_words: None,
            blacklist: Vec::new(),
            compounds: Vec::new(),
            output: OutputSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl ConfigSpec {
    /// Read and parse a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ExtractError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ExtractError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields of `cfg` with every value set in this file.
    ///
    /// An unparseable delimiter is left for validation to report.
    pub fn apply(&self, cfg: &mut ExtractorConfig) {
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
        if let Some(recursive) = self.recursive {
            cfg.recursive = recursive;
        }
        if let Some(n) = self.min_token_length {
            cfg.min_token_length = n;
        }
        if let Some(skip) = self.skip_numeric {
            cfg.skip_numeric = skip;
        }
        if let Some(filler) = self.filter_filler_words {
            cfg.filter_filler_words = filler;
        }
        cfg.blacklist.extend(self.blacklist.iter().cloned());
        cfg.compounds.extend(self.compounds.iter().cloned());

        let out = &self.output;
        if let Some(path) = &out.path {
            cfg.output.path = Some(path.clone());
        }
        if let Some(format) = out.format {
            cfg.output.format = format;
        }
        if let Some(Ok(delimiter)) = out.delimiter.as_deref().map(parse_delimiter) {
            cfg.output.delimiter = delimiter;
        }
        if let Some(include) = out.include_sentences {
            cfg.output.include_sentences = include;
        }
    }
}

/// Parse a delimiter argument: one character, or `\t` / `tab`.
pub fn parse_delimiter(value: &str) -> std::result::Result<char, String> {
    match value {
        "\\t" | "tab" | "TAB" => return Ok('\t'),
        _ => {}
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("delimiter must be a single character, got \"{value}\"")),
    }
}
