//! Extraction pipeline
//!
//! - [`runner`]: the [`Pipeline`] that threads documents through every stage
//! - [`traits`]: stage traits ([`Preprocessor`])
//! - [`observer`]: stage-boundary hooks and timing reports
//! - [`spec`]: the JSON configuration file
//! - [`validation`]: rules checked before a run starts

pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;

pub use observer::{NoopObserver, PipelineObserver, StageTimingObserver, TracingObserver};
pub use runner::Pipeline;
pub use spec::ConfigSpec;
pub use traits::{CompoundPreprocessor, NoopPreprocessor, Preprocessor};
pub use validation::{ensure_valid, ValidationEngine, ValidationReport};
