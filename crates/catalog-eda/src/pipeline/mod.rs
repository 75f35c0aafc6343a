//! Pipeline module.
//!
//! This module provides the analysis pipeline, its driver and progress reporting.

mod builder;
pub mod progress;

pub use builder::{AnalysisOutcome, Pipeline, PipelineBuilder, run};
pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
