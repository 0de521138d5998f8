//! Term frequency counting
//!
//! Terms are interned in first-seen order, so a term's ID doubles as its
//! global first-occurrence position (document order, then sentence, then
//! token). Per-document tables keep their own first-seen order.

use rustc_hash::FxHashMap;

use crate::types::Document;

/// Interned term identifier; smaller IDs were seen earlier.
pub type TermId = usize;

/// Per-term totals across the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermStats {
    pub term: String,
    /// Occurrences across all documents
    pub total: usize,
}

/// Counts of one document, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCounts {
    /// `(term, count)` pairs ordered by first occurrence in the document
    pub entries: Vec<(TermId, usize)>,
}

impl DocumentCounts {
    pub fn count(&self, id: TermId) -> usize {
        self.entries
            .iter()
            .find(|(term, _)| *term == id)
            .map_or(0, |(_, count)| *count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Global and per-document frequency tables.
#[derive(Debug, Clone, Default)]
pub struct TermCounts {
    index: FxHashMap<String, TermId>,
    terms: Vec<TermStats>,
    documents: Vec<DocumentCounts>,
}

impl TermCounts {
    /// Count keyword-eligible tokens of every document.
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut counts = Self::default();
        for doc in documents {
            counts.add_document(doc.keyword_tokens());
        }
        counts
    }

    /// Add one document's tokens, in order.
    pub fn add_document<'a, I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut local: FxHashMap<TermId, usize> = FxHashMap::default();
        let mut entries: Vec<(TermId, usize)> = Vec::new();

        for token in tokens {
            let id = self.intern(token);
            self.terms[id].total += 1;
            match local.get(&id) {
                Some(&slot) => entries[slot].1 += 1,
                None => {
                    local.insert(id, entries.len());
                    entries.push((id, 1));
                }
            }
        }

        self.documents.push(DocumentCounts { entries });
    }

    fn intern(&mut self, token: &str) -> TermId {
        if let Some(&id) = self.index.get(token) {
            return id;
        }
        let id = self.terms.len();
        self.index.insert(token.to_string(), id);
        self.terms.push(TermStats {
            term: token.to_string(),
            total: 0,
        });
        id
    }

    /// Look up a term's ID.
    pub fn id(&self, term: &str) -> Option<TermId> {
        self.index.get(term).copied()
    }

    pub fn stats(&self, id: TermId) -> &TermStats {
        &self.terms[id]
    }

    /// Global count of a term, 0 if unseen.
    pub fn total(&self, term: &str) -> usize {
        self.id(term).map_or(0, |id| self.terms[id].total)
    }

    /// All terms in first-seen order.
    pub fn terms(&self) -> &[TermStats] {
        &self.terms
    }

    /// Per-document tables in document order.
    pub fn documents(&self) -> &[DocumentCounts] {
        &self.documents
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(docs: &[&[&str]]) -> TermCounts {
        let mut counts = TermCounts::default();
        for doc in docs {
            counts.add_document(doc.iter().copied());
        }
        counts
    }

    #[test]
    fn test_global_and_document_counts() {
        let counts = counts(&[&["cats", "mice", "mice"], &["dogs", "mice"]]);

        assert_eq!(counts.total("mice"), 3);
        assert_eq!(counts.total("cats"), 1);
        assert_eq!(counts.total("dogs"), 1);
        assert_eq!(counts.total("birds"), 0);

        let mice = counts.id("mice").unwrap();
        assert_eq!(counts.stats(mice).total, 3);
        assert_eq!(counts.documents()[0].count(mice), 2);
        assert_eq!(counts.documents()[1].count(mice), 1);
    }

    #[test]
    fn test_ids_follow_first_occurrence() {
        let counts = counts(&[&["b", "a"], &["c", "a", "b"]]);
        let order: Vec<&str> = counts.terms().iter().map(|t| t.term.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);

        // The second document keeps its own first-seen order.
        let doc_order: Vec<TermId> = counts.documents()[1].entries.iter().map(|(id, _)| *id).collect();
        assert_eq!(doc_order, vec![2, 1, 0]);
    }

    #[test]
    fn test_empty_documents_still_recorded() {
        let counts = counts(&[&[], &["x"]]);
        assert_eq!(counts.documents().len(), 2);
        assert!(counts.documents()[0].is_empty());
        assert_eq!(counts.num_terms(), 1);
    }

    #[test]
    fn test_no_documents() {
        let counts = TermCounts::from_documents(&[]);
        assert!(counts.is_empty());
        assert!(counts.documents().is_empty());
    }
}
