//! Stop-word filtering
//!
//! Language stop-word lists come from the `stop-words` crate; Chinese and
//! Japanese use small built-in lists. User blacklists and the filler-word
//! preset are merged into the same set.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::errors::{ExtractError, Result};

/// Frequent low-information words that survive most stop-word lists but make
/// poor keywords.
pub const FILLER_WORDS: &[&str] = &[
    "year", "years", "day", "time", "make", "made", "easy", "hard", "stop", "good", "looked",
    "long", "making", "left", "stand", "pass", "true", "ago", "longer", "times", "turned",
    "greater", "and", "thing", "told", "thought", "changed", "words", "fact",
];

/// Language codes accepted by [`StopwordFilter::try_new`].
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "de", "fr", "es", "it", "pt", "nl", "ru", "sv", "no", "da", "fi", "hu", "tr", "pl",
    "ar", "zh", "ja",
];

/// Where a language's list comes from.
enum StopwordSource {
    Crate(LANGUAGE),
    Chinese,
    Japanese,
}

/// A filter for removing stopwords from token streams
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// Create a stopword filter for the given language code or English name.
    ///
    /// Unknown languages are an error rather than a silent fallback.
    pub fn try_new(language: &str) -> Result<Self> {
        let source = Self::resolve(language)
            .ok_or_else(|| ExtractError::UnsupportedLanguage(language.to_string()))?;
        Ok(Self {
            stopwords: Self::collect(source),
        })
    }

    /// Whether `language` names a supported stop-word list.
    pub fn is_supported(language: &str) -> bool {
        Self::resolve(language).is_some()
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add the [`FILLER_WORDS`] preset.
    pub fn with_filler_words(mut self) -> Self {
        self.add_stopwords(FILLER_WORDS);
        self
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_lowercase());
        }
    }

    /// Check if a word is a stopword, ignoring case
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Keep only the tokens that are not stopwords.
    pub fn retain_keywords<'a, I>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        tokens
            .into_iter()
            .filter(|t| !self.is_stopword(t))
            .cloned()
            .collect()
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn resolve(language: &str) -> Option<StopwordSource> {
        let lang = match language.trim().to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            "zh" | "chinese" => return Some(StopwordSource::Chinese),
            "ja" | "japanese" => return Some(StopwordSource::Japanese),
            _ => return None,
        };
        Some(StopwordSource::Crate(lang))
    }

    fn collect(source: StopwordSource) -> FxHashSet<String> {
        match source {
            StopwordSource::Crate(lang) => get(lang).iter().map(|s| s.to_string()).collect(),
            StopwordSource::Chinese => CHINESE.iter().map(|s| s.to_string()).collect(),
            StopwordSource::Japanese => JAPANESE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// The stop-words crate has no Chinese or Japanese list.
const CHINESE: &[&str] = &[
    "的", "是", "在", "有", "和", "与", "或", "不", "了", "也", "就", "都", "而", "及", "这",
    "那", "个", "为", "以", "等", "但", "被", "给", "让", "把", "从", "到", "对", "将", "于",
    "能", "会", "可", "要", "很", "还", "更", "最", "只", "已", "又", "再",
];

const JAPANESE: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる", "も",
    "する", "から", "な", "こと", "として", "い", "や", "など", "なっ", "ない", "この", "ため",
    "その", "あっ", "よう", "また", "もの", "という", "あり", "まで", "られ", "なる", "へ", "か",
    "だ", "これ", "によって", "により", "おり",
];
