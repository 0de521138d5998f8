//! Natural Language Processing components
//!
//! This module provides sentence/word tokenization and stopword filtering.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::StopwordFilter;
pub use tokenizer::{Tokenizer, TokenizerConfig};
