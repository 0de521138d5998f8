//! Keyword selection and ranking
//!
//! Selection picks candidate terms (top N per document, or top N over the
//! folder); the final table orders candidates by descending global frequency
//! and truncates it. Every sort breaks ties by first occurrence, so the
//! output is fully determined by the input.

use rustc_hash::FxHashSet;

use super::counter::{TermCounts, TermId};
use crate::types::{ExtractorConfig, RankScope};

/// Configuration for keyword ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankerConfig {
    /// Terms selected per document (or globally)
    pub num_of_keywords: usize,
    /// Rows kept in the final table
    pub table_limit: usize,
    /// Terms below this global count are dropped
    pub min_count: usize,
    pub scope: RankScope,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            num_of_keywords: 3,
            table_limit: 3,
            min_count: 1,
            scope: RankScope::PerDocument,
        }
    }
}

impl From<&ExtractorConfig> for RankerConfig {
    fn from(cfg: &ExtractorConfig) -> Self {
        Self {
            num_of_keywords: cfg.num_of_keywords,
            table_limit: cfg.keyword_limit_in_final_table,
            min_count: cfg.min_count,
            scope: cfg.scope,
        }
    }
}

/// A term chosen for the final table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTerm {
    /// 1-based rank
    pub rank: usize,
    pub id: TermId,
    pub term: String,
    pub frequency: usize,
}

/// Frequency-based keyword ranker
#[derive(Debug, Clone, Default)]
pub struct KeywordRanker {
    config: RankerConfig,
}

impl KeywordRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn with_num_of_keywords(mut self, n: usize) -> Self {
        self.config.num_of_keywords = n;
        self
    }

    pub fn with_table_limit(mut self, limit: usize) -> Self {
        self.config.table_limit = limit;
        self
    }

    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.config.min_count = min_count;
        self
    }

    pub fn with_scope(mut self, scope: RankScope) -> Self {
        self.config.scope = scope;
        self
    }

    /// Candidate terms before the final ordering, in first-seen order.
    pub fn select(&self, counts: &TermCounts) -> Vec<TermId> {
        let n = self.config.num_of_keywords;
        let mut selected: Vec<TermId> = match self.config.scope {
            RankScope::PerDocument => {
                let mut seen: FxHashSet<TermId> = FxHashSet::default();
                let mut out = Vec::new();
                for doc in counts.documents() {
                    // `entries` is in first-seen order and the sort is stable.
                    let mut entries = doc.entries.clone();
                    entries.sort_by(|a, b| b.1.cmp(&a.1));
                    for (id, _) in entries.into_iter().take(n) {
                        if seen.insert(id) {
                            out.push(id);
                        }
                    }
                }
                out
            }
            RankScope::Global => {
                let mut ids: Vec<TermId> = (0..counts.num_terms()).collect();
                ids.sort_by(|a, b| counts.stats(*b).total.cmp(&counts.stats(*a).total));
                ids.truncate(n);
                ids
            }
        };
        selected.sort_unstable();
        selected
    }

    /// Select, filter and order terms into the final table.
    pub fn rank(&self, counts: &TermCounts) -> Vec<RankedTerm> {
        let min_count = self.config.min_count.max(1);
        let mut candidates: Vec<TermId> = self
            .select(counts)
            .into_iter()
            .filter(|id| counts.stats(*id).total >= min_count)
            .collect();

        // Candidates are in ascending ID order, so the stable sort keeps
        // first-seen order among equal frequencies.
        candidates.sort_by(|a, b| counts.stats(*b).total.cmp(&counts.stats(*a).total));
        candidates.truncate(self.config.table_limit);

        candidates
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let stats = counts.stats(id);
                RankedTerm {
                    rank: i + 1,
                    id,
                    term: stats.term.clone(),
                    frequency: stats.total,
                }
            })
            .collect()
    }
}
