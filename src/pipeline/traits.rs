//! Stage trait definitions for the pipeline.
//!
//! Stages are statically dispatched; the runner is generic over them.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use crate::types::ExtractorConfig;

// ============================================================================
// Preprocessor: raw text normalization (stage 0)
// ============================================================================

/// Text normalization applied to every document before sentence splitting.
///
/// # Contract
///
/// - **Input**: the raw document text.
/// - **Output**: the normalized text; return `Cow::Borrowed` when nothing
///   changed to avoid a copy.
/// - **Idempotent**: preprocessing twice gives the same text as once.
pub trait Preprocessor {
    fn preprocess<'a>(&self, text: &'a str, cfg: &ExtractorConfig) -> Cow<'a, str>;
}

/// Passes text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn preprocess<'a>(&self, text: &'a str, _cfg: &ExtractorConfig) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Joins the configured multi-word phrases into single tokens.
///
/// `"al Qaeda"` in [`ExtractorConfig::compounds`] turns every whitespace
/// separated, case-insensitive occurrence of those words into `alQaeda`, so
/// the phrase is counted as one keyword. Longer phrases win when several
/// match at the same position.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundPreprocessor;

impl Preprocessor for CompoundPreprocessor {
    fn preprocess<'a>(&self, text: &'a str, cfg: &ExtractorConfig) -> Cow<'a, str> {
        let mut phrases: Vec<Vec<String>> = cfg
            .compounds
            .iter()
            .map(|p| p.unicode_words().map(str::to_lowercase).collect::<Vec<_>>())
            .filter(|words| words.len() > 1)
            .collect();
        if phrases.is_empty() {
            return Cow::Borrowed(text);
        }
        phrases.sort_by(|a, b| b.len().cmp(&a.len()));

        match join_phrases(text, &phrases) {
            Some(joined) => Cow::Owned(joined),
            None => Cow::Borrowed(text),
        }
    }
}

/// Rewrite matches of `phrases` (lower-cased word lists, longest first).
/// Returns `None` when nothing matched.
fn join_phrases(text: &str, phrases: &[Vec<String>]) -> Option<String> {
    let words: Vec<(usize, &str)> = text.unicode_word_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = false;
    let mut i = 0;

    while i < words.len() {
        let matched = phrases.iter().find(|phrase| matches_at(text, &words, i, phrase));
        let Some(phrase) = matched else {
            i += 1;
            continue;
        };

        let span = &words[i..i + phrase.len()];
        let (start, _) = span[0];
        let (last_start, last) = span[span.len() - 1];
        out.push_str(&text[cursor..start]);
        for (_, word) in span {
            out.push_str(word);
        }
        cursor = last_start + last.len();
        replaced = true;
        i += phrase.len();
    }

    if !replaced {
        return None;
    }
    out.push_str(&text[cursor..]);
    Some(out)
}

fn matches_at(text: &str, words: &[(usize, &str)], i: usize, phrase: &[String]) -> bool {
    if i + phrase.len() > words.len() {
        return false;
    }
    for (j, expected) in phrase.iter().enumerate() {
        let (start, word) = words[i + j];
        if word.to_lowercase() != *expected {
            return false;
        }
        if j > 0 {
            // Words must be separated by whitespace only.
            let (prev_start, prev) = words[i + j - 1];
            let gap = &text[prev_start + prev.len()..start];
            if !gap.chars().all(char::is_whitespace) {
                return false;
            }
        }
    }
    true
}
