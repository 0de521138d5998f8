//! Sentence and word splitting
//!
//! Sentence boundaries and word boundaries both follow Unicode UAX #29 via
//! `unicode-segmentation`. Word segmentation drops punctuation and
//! whitespace; tokens are lower-cased.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordFilter;
use crate::types::{Document, ExtractorConfig, Sentence};

/// Configuration for word tokenization
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Tokens with fewer characters are dropped
    pub min_token_length: usize,
    /// Drop tokens with no alphabetic character (numbers, dates, versions)
    pub skip_numeric: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_length: 1,
            skip_numeric: true,
        }
    }
}

impl From<&ExtractorConfig> for TokenizerConfig {
    fn from(cfg: &ExtractorConfig) -> Self {
        Self {
            min_token_length: cfg.min_token_length,
            skip_numeric: cfg.skip_numeric,
        }
    }
}

/// Unicode-aware sentence and word tokenizer
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn with_min_token_length(mut self, min_token_length: usize) -> Self {
        self.config.min_token_length = min_token_length;
        self
    }

    pub fn with_skip_numeric(mut self, skip_numeric: bool) -> Self {
        self.config.skip_numeric = skip_numeric;
        self
    }

    /// Split text into trimmed, non-empty sentences.
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Split a sentence into normalized word tokens.
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        sentence
            .unicode_words()
            .filter(|w| self.keep(w))
            .map(str::to_lowercase)
            .collect()
    }

    /// Tokenize a loaded document and mark keyword-eligible tokens.
    pub fn tokenize_document(&self, id: &str, text: &str, filter: &StopwordFilter) -> Document {
        let sentences = self
            .split_sentences(text)
            .into_iter()
            .map(|s| s.to_string())
            .filter_map(|text| {
                let tokens = self.tokenize(&text);
                // Sentences made only of punctuation or numbers carry nothing.
                if tokens.is_empty() {
                    return None;
                }
                let keywords = filter.retain_keywords(&tokens);
                Some((text, tokens, keywords))
            })
            .enumerate()
            .map(|(index, (text, tokens, keywords))| Sentence {
                index,
                text,
                tokens,
                keywords,
            })
            .collect();

        Document {
            id: id.to_string(),
            sentences,
        }
    }

    fn keep(&self, word: &str) -> bool {
        if word.chars().count() < self.config.min_token_length {
            return false;
        }
        if self.config.skip_numeric && !word.chars().any(char::is_alphabetic) {
            return false;
        }
        true
    }
}
