//! Report surface handed to presentation / export code
//!
//! Everything here is read-only once ingestion completes.

use std::fmt;

use aggregation::{AccumulatorSnapshot, Dimension, GroupedIndex};
use contracts::{SurveyRecord, ThresholdWindow};
use serde::Serialize;

use crate::error::{IngestionError, RowError};

/// A discarded row and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiagnostic {
    /// Source identifier (file name)
    pub source: String,
    /// 1-based index among post-header qualifying rows
    pub row: usize,
    /// 1-based index among all qualifying lines, header included
    pub qualifying_line: usize,
    /// 1-based physical line number
    pub line_number: usize,
    pub error: RowError,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} (line {}): {}",
            self.source, self.row, self.line_number, self.error
        )
    }
}

/// Line counters of one or more ingestion runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Physical lines read
    pub lines_read: u64,
    /// Lines without the separator past the first character
    pub lines_ignored: u64,
    /// Qualifying lines discarded as header
    pub header_lines_skipped: u64,
    /// Rows turned into records
    pub rows_accepted: u64,
    /// Rows discarded with a diagnostic
    pub rows_rejected: u64,
}

impl RunSummary {
    pub fn merge(&mut self, other: &RunSummary) {
        self.lines_read += other.lines_read;
        self.lines_ignored += other.lines_ignored;
        self.header_lines_skipped += other.header_lines_skipped;
        self.rows_accepted += other.rows_accepted;
        self.rows_rejected += other.rows_rejected;
    }
}

/// Result of ingesting one or more survey sources
#[derive(Debug, Clone, Default, Serialize)]
pub struct SurveyReport {
    sources: Vec<String>,
    summary: RunSummary,
    records: Vec<SurveyRecord>,
    index: GroupedIndex,
    diagnostics: Vec<RowDiagnostic>,
}

impl SurveyReport {
    pub(crate) fn new(
        sources: Vec<String>,
        summary: RunSummary,
        records: Vec<SurveyRecord>,
        index: GroupedIndex,
        diagnostics: Vec<RowDiagnostic>,
    ) -> Self {
        Self {
            sources,
            summary,
            records,
            index,
            diagnostics,
        }
    }

    /// Sources that contributed, in ingestion order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Accepted records in input order
    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn index(&self) -> &GroupedIndex {
        &self.index
    }

    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        &self.diagnostics
    }

    /// One dimension table ordered by key
    pub fn table(&self, dimension: Dimension) -> Vec<(String, AccumulatorSnapshot)> {
        self.index.sorted_entries(dimension)
    }

    /// Number of records exceeding each window
    pub fn exceedance_counts(&self) -> Vec<(ThresholdWindow, usize)> {
        ThresholdWindow::ALL
            .into_iter()
            .map(|window| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.exceeds.get(window))
                    .count();
                (window, count)
            })
            .collect()
    }

    /// Combine with a report from an independent run.
    ///
    /// Records and diagnostics are concatenated (self first), accumulators merged.
    pub fn merge(mut self, other: SurveyReport) -> SurveyReport {
        self.sources.extend(other.sources);
        self.summary.merge(&other.summary);
        self.records.extend(other.records);
        self.index.merge(&other.index);
        self.diagnostics.extend(other.diagnostics);
        self
    }
}

/// Report plus the fatal error that cut the run short, if any
#[derive(Debug)]
pub struct IngestionOutcome {
    /// Everything ingested before the run ended
    pub report: SurveyReport,
    pub fatal: Option<IngestionError>,
}

impl IngestionOutcome {
    pub fn is_success(&self) -> bool {
        self.fatal.is_none()
    }

    /// Drop the partial report if the run failed
    pub fn into_result(self) -> Result<SurveyReport, IngestionError> {
        match self.fatal {
            None => Ok(self.report),
            Some(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = RowDiagnostic {
            source: "survey.txt".into(),
            row: 4,
            qualifying_line: 9,
            line_number: 11,
            error: RowError::MissingField {
                field: "offset_sign",
                position: 26,
            },
        };
        assert_eq!(
            diag.to_string(),
            "survey.txt row 4 (line 11): missing field 'offset_sign' at position 26"
        );
    }

    #[test]
    fn test_summary_merge() {
        let mut a = RunSummary {
            lines_read: 10,
            lines_ignored: 1,
            header_lines_skipped: 5,
            rows_accepted: 3,
            rows_rejected: 1,
        };
        a.merge(&a.clone());
        assert_eq!(a.lines_read, 20);
        assert_eq!(a.rows_rejected, 2);
    }

    #[test]
    fn test_empty_report() {
        let report = SurveyReport::default();
        assert!(report.records().is_empty());
        assert!(report.index().is_empty());
        assert!(report.exceedance_counts().iter().all(|(_, n)| *n == 0));
    }
}
