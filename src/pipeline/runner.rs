//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`Pipeline::run`] loads the configured folder, then threads the documents
//! through tokenization, counting, ranking and occurrence indexing, notifying
//! a [`PipelineObserver`] at each boundary. [`Pipeline::run_sources`] skips
//! the loader and works on documents already in memory.

use tracing::info;

use crate::errors::Result;
use crate::loader::DocumentLoader;
use crate::nlp::{StopwordFilter, Tokenizer, TokenizerConfig};
use crate::occurrence::OccurrenceIndexer;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_COUNT, STAGE_INDEX,
    STAGE_LOAD, STAGE_RANK, STAGE_TOKENIZE,
};
use crate::pipeline::traits::{CompoundPreprocessor, Preprocessor};
use crate::rank::{KeywordRanker, RankerConfig, TermCounts};
use crate::types::{CorpusStats, Document, ExtractorConfig, KeywordTable, SourceDocument};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline
// ============================================================================

/// Keyword extraction pipeline.
///
/// Generic over the [`Preprocessor`] stage; every other stage is built from
/// the [`ExtractorConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline<Pre = CompoundPreprocessor> {
    pub preprocessor: Pre,
    pub loader: DocumentLoader,
    pub tokenizer: Tokenizer,
    pub stopwords: StopwordFilter,
    pub ranker: KeywordRanker,
    pub indexer: OccurrenceIndexer,
    config: ExtractorConfig,
}

impl Pipeline {
    /// Build the default pipeline for `config`.
    ///
    /// Fails if the stop-word language is not supported.
    pub fn from_config(config: ExtractorConfig) -> Result<Self> {
        let mut stopwords = StopwordFilter::try_new(&config.language)?;
        if config.filter_filler_words {
            stopwords = stopwords.with_filler_words();
        }
        stopwords.add_stopwords(&config.blacklist);

        Ok(Self::with_stopwords(config, stopwords))
    }

    /// Build a pipeline with an explicit stop-word filter.
    pub fn with_stopwords(config: ExtractorConfig, stopwords: StopwordFilter) -> Self {
        Pipeline {
            preprocessor: CompoundPreprocessor,
            loader: DocumentLoader::from_config(&config),
            tokenizer: Tokenizer::with_config(TokenizerConfig::from(&config)),
            stopwords,
            ranker: KeywordRanker::with_config(RankerConfig::from(&config)),
            indexer: OccurrenceIndexer::new().with_sentences(config.output.include_sentences),
            config,
        }
    }
}

impl<Pre: Preprocessor> Pipeline<Pre> {
    /// Swap the preprocessor stage.
    pub fn preprocessor<P: Preprocessor>(self, preprocessor: P) -> Pipeline<P> {
        Pipeline {
            preprocessor,
            loader: self.loader,
            tokenizer: self.tokenizer,
            stopwords: self.stopwords,
            ranker: self.ranker,
            indexer: self.indexer,
            config: self.config,
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Load the configured folder and extract its keyword table.
    pub fn run(&self, observer: &mut impl PipelineObserver) -> Result<KeywordTable> {
        let sources = {
            trace_stage!(STAGE_LOAD);
            observer.on_stage_start(STAGE_LOAD);
            let clock = StageClock::start();
            let sources = self.loader.load(&self.config.folder)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .documents(sources.len())
                .build();
            observer.on_stage_end(STAGE_LOAD, &report);
            sources
        };
        info!(
            folder = %self.config.folder.display(),
            documents = sources.len(),
            "loaded documents"
        );

        Ok(self.run_sources(&sources, observer))
    }

    /// Extract the keyword table of documents already in memory.
    ///
    /// Stages run in order:
    /// 1. Tokenize (preprocess, split sentences and words, filter stop words)
    /// 2. Count term frequencies
    /// 3. Rank and truncate
    /// 4. Index occurrences
    pub fn run_sources(
        &self,
        sources: &[SourceDocument],
        observer: &mut impl PipelineObserver,
    ) -> KeywordTable {
        // Stage 1: Tokenize
        let documents = {
            trace_stage!(STAGE_TOKENIZE);
            observer.on_stage_start(STAGE_TOKENIZE);
            let clock = StageClock::start();
            let documents: Vec<Document> = sources
                .iter()
                .map(|source| {
                    let text = self.preprocessor.preprocess(&source.text, &self.config);
                    self.tokenizer
                        .tokenize_document(&source.id, &text, &self.stopwords)
                })
                .collect();
            let report = StageReportBuilder::new(clock.elapsed())
                .documents(documents.len())
                .sentences(documents.iter().map(|d| d.sentences.len()).sum())
                .build();
            observer.on_stage_end(STAGE_TOKENIZE, &report);
            observer.on_documents(&documents);
            documents
        };

        // Stage 2: Count
        let counts = {
            trace_stage!(STAGE_COUNT);
            observer.on_stage_start(STAGE_COUNT);
            let clock = StageClock::start();
            let counts = TermCounts::from_documents(&documents);
            let report = StageReportBuilder::new(clock.elapsed())
                .terms(counts.num_terms())
                .build();
            observer.on_stage_end(STAGE_COUNT, &report);
            observer.on_counts(&counts);
            counts
        };

        // Stage 3: Rank
        let ranked = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let ranked = self.ranker.rank(&counts);
            let report = StageReportBuilder::new(clock.elapsed())
                .keywords(ranked.len())
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_ranked(&ranked);
            ranked
        };

        // Stage 4: Index occurrences
        let keywords = {
            trace_stage!(STAGE_INDEX);
            observer.on_stage_start(STAGE_INDEX);
            let clock = StageClock::start();
            let keywords = self.indexer.index(&ranked, &documents);
            observer.on_stage_end(STAGE_INDEX, &StageReport::new(clock.elapsed()));
            keywords
        };

        let stats = CorpusStats {
            documents: documents.len(),
            sentences: documents.iter().map(|d| d.sentences.len()).sum(),
            tokens: documents.iter().map(Document::num_tokens).sum(),
            terms: counts.num_terms(),
        };
        info!(
            documents = stats.documents,
            sentences = stats.sentences,
            terms = stats.terms,
            keywords = keywords.len(),
            "extracted keywords"
        );

        KeywordTable { keywords, stats }
    }
}

// ============================================================================
// Tests
// ============================================================================
