//! Report generation module.
//!
//! This module turns a finished [`PipelineResult`](crate::types::PipelineResult)
//! into output:
//! - [`ChartData`]: the numbers behind the five summary figures
//! - [`ConsoleReport`]: the sectioned text report printed to stdout
//! - [`ComprehensiveReport`]: the JSON report (`--json`, `--emit-report`)
//! - cleaned dataset export through [`ReportGenerator`]
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_eda::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_comprehensive_report(
//!     Path::new("netflix_titles.csv"),
//!     None,
//!     &result,
//!     &charts,
//! );
//! let generator = ReportGenerator::new(PathBuf::from("outputs"), None);
//! generator.write_report_to_file(&report, "netflix_titles")?;
//! ```

mod charts;
mod console;
mod generator;

pub use charts::{
    BoxStats, CORRELATION_COLUMNS, ChartData, CorrelationMatrix, DurationByRecency, Histogram,
};
pub use console::ConsoleReport;
pub use generator::{ComprehensiveReport, ReportGenerator, input_stem};
