//! # Ingestion Pipeline
//!
//! Survey file ingestion module.
//!
//! Responsibilities:
//! - Filter qualifying lines and skip header lines
//! - Parse data rows into `SurveyRecord` with per-row error isolation
//! - Classify offsets against the eight threshold windows
//! - Fold accepted records into the grouped statistics index
//!
//! ## Usage Example
//!
//! ```no_run
//! use contracts::SourceConfig;
//! use ingestion::IngestionPipeline;
//! use aggregation::Dimension;
//!
//! let outcome = IngestionPipeline::new(SourceConfig::new("/data", "survey.txt")).run();
//! for (device_type, stats) in outcome.report.table(Dimension::DeviceType) {
//!     println!("{device_type}: {stats}");
//! }
//! if let Some(err) = outcome.fatal {
//!     eprintln!("ingestion aborted: {err}");
//! }
//! ```
//!
//! ## Mock Testing
//!
//! ```
//! use ingestion::{mock_survey, MockSurveyRow};
//!
//! let content = mock_survey(5, &[MockSurveyRow::new(1).offset_ms(45_000)], "|");
//! assert_eq!(content.lines().count(), 6);
//! ```

pub mod classifier;
mod error;
mod mock;
pub mod parser;
mod pipeline;
mod report;
pub mod tokenizer;

// Re-exports
pub use contracts::SurveyRecord;
pub use error::{IngestionError, Result, RowError};
pub use mock::{mock_header, mock_survey, MockSurveyRow};
pub use parser::{parse_record, FIELD_COUNT};
pub use pipeline::IngestionPipeline;
pub use report::{IngestionOutcome, RowDiagnostic, RunSummary, SurveyReport};
