//! Frequency counting and keyword ranking

pub mod counter;
pub mod ranker;

pub use counter::{DocumentCounts, TermCounts, TermId, TermStats};
pub use ranker::{KeywordRanker, RankedTerm, RankerConfig};
