//! Core types shared by every stage.
//!
//! Configuration ([`ExtractorConfig`]), the document model produced by the
//! loader and tokenizer, and the keyword table handed to the writers.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default name of the CSV output file.
pub const DEFAULT_CSV_OUTPUT: &str = "key_words_extracted.csv";

/// Default name of the TSV output file.
pub const DEFAULT_TSV_OUTPUT: &str = "key_words_extracted.tsv";

/// Default name of the JSON output file.
pub const DEFAULT_JSON_OUTPUT: &str = "key_words_extracted.json";

// ============================================================================
// Configuration
// ============================================================================

/// Where top-N keyword selection is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankScope {
    /// Take the top N tokens of every document, then merge.
    #[default]
    PerDocument,
    /// Take the top N tokens of the whole folder.
    Global,
}

impl RankScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerDocument => "per_document",
            Self::Global => "global",
        }
    }
}

impl std::str::FromStr for RankScope {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "per_document" | "per-document" | "document" | "doc" => Ok(Self::PerDocument),
            "global" | "folder" | "all" => Ok(Self::Global),
            other => Err(format!(
                "unknown scope \"{other}\" (expected per-document or global)"
            )),
        }
    }
}

/// Output table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    /// CSV layout with a tab delimiter, whatever the configured delimiter.
    Tsv,
    Json,
}

impl OutputFormat {
    /// File name used when no explicit output path is configured.
    pub fn default_path(&self) -> PathBuf {
        match self {
            Self::Csv => PathBuf::from(DEFAULT_CSV_OUTPUT),
            Self::Tsv => PathBuf::from(DEFAULT_TSV_OUTPUT),
            Self::Json => PathBuf::from(DEFAULT_JSON_OUTPUT),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format \"{other}\" (expected csv, tsv or json)"
            )),
        }
    }
}

/// Resolved configuration for one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Input directory
    pub folder: PathBuf,
    /// Stop-word language code or name
    pub language: String,
    /// Keywords selected per document (or globally, see [`RankScope`])
    pub num_of_keywords: usize,
    /// Maximum number of rows in the final table
    pub keyword_limit_in_final_table: usize,
    /// Minimum global frequency for a keyword to be kept
    pub min_count: usize,
    pub scope: RankScope,
    /// File extension of documents to read (without the dot)
    pub extension: String,
    /// Descend into subfolders
    pub recursive: bool,
    /// Tokens shorter than this many characters are ignored
    pub min_token_length: usize,
    /// Ignore tokens made only of digits and numeric punctuation
    pub skip_numeric: bool,
    /// Also drop the built-in filler-word list
    pub filter_filler_words: bool,
    /// Extra words excluded from keyword consideration
    pub blacklist: Vec<String>,
    /// Multi-word phrases joined into a single token before tokenizing
    pub compounds: Vec<String>,
    /// Output settings
    pub output: OutputConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            language: "en".to_string(),
            num_of_keywords: 3,
            keyword_limit_in_final_table: 3,
            min_count: 1,
            scope: RankScope::PerDocument,
            extension: "txt".to_string(),
            recursive: false,
            min_token_length: 1,
            skip_numeric: true,
            filter_filler_words: false,
            blacklist: Vec::new(),
            compounds: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

/// Where and how the keyword table is written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Explicit output path; `None` means the format's default file name
    pub path: Option<PathBuf>,
    pub format: OutputFormat,
    /// Field delimiter for CSV output
    pub delimiter: char,
    /// Add a column with the text of every matched sentence
    pub include_sentences: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: OutputFormat::Csv,
            delimiter: ',',
            include_sentences: false,
        }
    }
}

impl OutputConfig {
    /// The path the table will be written to.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.format.default_path())
    }
}

// ============================================================================
// Document model
// ============================================================================

/// A file read from the input folder, before tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path relative to the input folder, `/`-separated
    pub id: String,
    pub path: PathBuf,
    pub text: String,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: PathBuf::from(&id),
            id,
            text: text.into(),
        }
    }
}

/// A sentence with its normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Index of the sentence within its document (0-based)
    pub index: usize,
    /// Sentence text as written, trimmed
    pub text: String,
    /// All word tokens, lower-cased, punctuation stripped
    pub tokens: Vec<String>,
    /// Tokens that survived stop-word and blacklist filtering
    pub keywords: Vec<String>,
}

/// A tokenized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn num_tokens(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    /// Keyword-eligible tokens in document order.
    pub fn keyword_tokens(&self) -> impl Iterator<Item = &str> {
        self.sentences
            .iter()
            .flat_map(|s| s.keywords.iter().map(String::as_str))
    }
}

// ============================================================================
// Keyword table
// ============================================================================

/// A (document, sentence) pair where a keyword occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub document: String,
    pub sentence: usize,
}

impl Location {
    pub fn new(document: impl Into<String>, sentence: usize) -> Self {
        Self {
            document: document.into(),
            sentence,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.sentence)
    }
}

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordRecord {
    /// 1-based position in the table
    pub rank: usize,
    pub keyword: String,
    /// Number of occurrences across all documents
    pub frequency: usize,
    /// Distinct documents containing the keyword, in document order
    pub documents: Vec<String>,
    /// Distinct (document, sentence) pairs containing the keyword
    pub locations: Vec<Location>,
    /// Text of each located sentence (only when sentence capture is on)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<String>,
}

/// Counts describing the processed corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub documents: usize,
    pub sentences: usize,
    pub tokens: usize,
    /// Distinct keyword-eligible terms
    pub terms: usize,
}

/// Final ranked table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordTable {
    pub keywords: Vec<KeywordRecord>,
    pub stats: CorpusStats,
}

impl KeywordTable {
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Look up a record by keyword.
    pub fn get(&self, keyword: &str) -> Option<&KeywordRecord> {
        self.keywords.iter().find(|r| r.keyword == keyword)
    }
}
