//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic, e.g. timing stages or capturing intermediate artifacts in tests.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::rank::{RankedTerm, TermCounts};
use crate::types::Document;

pub const STAGE_LOAD: &str = "load";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_COUNT: &str = "count";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_INDEX: &str = "index";

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage did and how long it took.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    documents: Option<usize>,
    sentences: Option<usize>,
    terms: Option<usize>,
    keywords: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Default::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn documents(&self) -> Option<usize> {
        self.documents
    }

    pub fn sentences(&self) -> Option<usize> {
        self.sentences
    }

    pub fn terms(&self) -> Option<usize> {
        self.terms
    }

    pub fn keywords(&self) -> Option<usize> {
        self.keywords
    }
}

/// Fluent construction of a [`StageReport`] with optional counts.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn documents(mut self, n: usize) -> Self {
        self.report.documents = Some(n);
        self
    }

    pub fn sentences(mut self, n: usize) -> Self {
        self.report.sentences = Some(n);
        self
    }

    pub fn terms(mut self, n: usize) -> Self {
        self.report.terms = Some(n);
        self
    }

    pub fn keywords(mut self, n: usize) -> Self {
        self.report.keywords = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks at stage boundaries. Every method defaults to a no-op.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_documents(&mut self, _documents: &[Document]) {}

    fn on_counts(&mut self, _counts: &TermCounts) {}

    fn on_ranked(&mut self, _ranked: &[RankedTerm]) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects every stage report in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Sum of all stage durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Logs each finished stage at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        debug!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            documents = report.documents(),
            sentences = report.sentences(),
            terms = report.terms(),
            keywords = report.keywords(),
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .documents(2)
            .terms(10)
            .build();

        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.documents(), Some(2));
        assert_eq!(report.terms(), Some(10));
        assert_eq!(report.sentences(), None);
        assert_eq!(report.keywords(), None);
    }

    #[test]
    fn test_timing_observer_collects_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_LOAD);
        obs.on_stage_end(STAGE_LOAD, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STAGE_LOAD, STAGE_RANK]);
        assert_eq!(obs.total(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
