//! Occurrence indexing
//!
//! For every ranked keyword, collect the distinct (document, sentence) pairs
//! whose normalized tokens contain it. A keyword repeated inside a sentence
//! is recorded once.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::rank::RankedTerm;
use crate::types::{Document, KeywordRecord, Location};

/// Builds keyword records with their occurrence locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceIndexer {
    include_sentences: bool,
}

/// Locations of one keyword while indexing.
#[derive(Debug, Default)]
struct Occurrences {
    documents: Vec<String>,
    locations: Vec<Location>,
    sentences: Vec<String>,
}

impl OccurrenceIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the text of every located sentence.
    pub fn with_sentences(mut self, include_sentences: bool) -> Self {
        self.include_sentences = include_sentences;
        self
    }

    /// Index `ranked` keywords against `documents`.
    ///
    /// Records come back in rank order. Locations are ordered by document,
    /// then sentence index.
    pub fn index(&self, ranked: &[RankedTerm], documents: &[Document]) -> Vec<KeywordRecord> {
        let lookup: FxHashMap<&str, usize> = ranked
            .iter()
            .enumerate()
            .map(|(slot, r)| (r.term.as_str(), slot))
            .collect();
        let mut found: Vec<Occurrences> = ranked.iter().map(|_| Occurrences::default()).collect();

        if !lookup.is_empty() {
            for doc in documents {
                for sentence in &doc.sentences {
                    let mut hits: FxHashSet<usize> = FxHashSet::default();
                    for token in &sentence.tokens {
                        if let Some(&slot) = lookup.get(token.as_str()) {
                            hits.insert(slot);
                        }
                    }
                    for slot in hits {
                        let entry = &mut found[slot];
                        if entry.documents.last() != Some(&doc.id) {
                            entry.documents.push(doc.id.clone());
                        }
                        entry.locations.push(Location::new(doc.id.clone(), sentence.index));
                        if self.include_sentences {
                            entry.sentences.push(sentence.text.clone());
                        }
                    }
                }
            }
        }

        ranked
            .iter()
            .zip(found)
            .map(|(r, occ)| KeywordRecord {
                rank: r.rank,
                keyword: r.term.clone(),
                frequency: r.frequency,
                documents: occ.documents,
                locations: occ.locations,
                sentences: occ.sentences,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentence;

    fn sentence(index: usize, text: &str) -> Sentence {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .collect();
        Sentence {
            index,
            text: text.to_string(),
            keywords: tokens.clone(),
            tokens,
        }
    }

    fn doc(id: &str, sentences: &[&str]) -> Document {
        Document {
            id: id.to_string(),
            sentences: sentences
                .iter()
                .enumerate()
                .map(|(i, s)| sentence(i, s))
                .collect(),
        }
    }

    fn ranked(term: &str, rank: usize, frequency: usize) -> RankedTerm {
        RankedTerm {
            rank,
            id: rank - 1,
            term: term.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_repeated_word_in_sentence_recorded_once() {
        let docs = vec![doc("a.txt", &["Mice mice everywhere.", "No cats here."])];
        let records = OccurrenceIndexer::new().index(&[ranked("mice", 1, 2)], &docs);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].locations, vec![Location::new("a.txt", 0)]);
        assert_eq!(records[0].documents, vec!["a.txt"]);
    }

    #[test]
    fn test_locations_span_documents_in_order() {
        let docs = vec![
            doc("a.txt", &["Cats chase mice.", "Mice run fast."]),
            doc("b.txt", &["Dogs ignore mice."]),
        ];
        let records = OccurrenceIndexer::new().index(
            &[ranked("mice", 1, 3), ranked("cats", 2, 1)],
            &docs,
        );

        assert_eq!(records[0].keyword, "mice");
        assert_eq!(
            records[0].locations,
            vec![
                Location::new("a.txt", 0),
                Location::new("a.txt", 1),
                Location::new("b.txt", 0),
            ]
        );
        assert_eq!(records[0].documents, vec!["a.txt", "b.txt"]);
        assert_eq!(records[1].locations, vec![Location::new("a.txt", 0)]);
        assert!(records[1].sentences.is_empty());
    }

    #[test]
    fn test_sentence_capture() {
        let docs = vec![doc("a.txt", &["Cats chase mice.", "Mice run fast."])];
        let records = OccurrenceIndexer::new()
            .with_sentences(true)
            .index(&[ranked("mice", 1, 2)], &docs);

        assert_eq!(records[0].sentences, vec!["Cats chase mice.", "Mice run fast."]);
    }

    #[test]
    fn test_every_location_contains_keyword() {
        let docs = vec![
            doc("a.txt", &["alpha beta", "gamma", "beta beta delta"]),
            doc("b.txt", &["delta alpha", "beta"]),
        ];
        let terms = [ranked("beta", 1, 4), ranked("alpha", 2, 2), ranked("delta", 3, 2)];
        let records = OccurrenceIndexer::new().index(&terms, &docs);

        for record in &records {
            assert!(!record.locations.is_empty());
            for loc in &record.locations {
                let d = docs.iter().find(|d| d.id == loc.document).unwrap();
                assert!(d.sentences[loc.sentence].tokens.contains(&record.keyword));
            }
        }
    }

    #[test]
    fn test_no_keywords() {
        let docs = vec![doc("a.txt", &["anything"])];
        assert!(OccurrenceIndexer::new().index(&[], &docs).is_empty());
    }
}
