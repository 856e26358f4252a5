//! Ingestion Pipeline main entry

use std::fs::File;
use std::io::{BufRead, BufReader};

use aggregation::{Dimension, GroupedIndex};
use contracts::{SourceConfig, SurveyRecord};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{IngestionError, Result};
use crate::parser::{self, FIELD_COUNT};
use crate::report::{IngestionOutcome, RowDiagnostic, RunSummary, SurveyReport};
use crate::tokenizer;

/// Identifier used in diagnostics when the config names no file
const UNNAMED_SOURCE: &str = "<input>";

/// Ingestion Pipeline
///
/// Reads survey lines one at a time, parses each data row and folds accepted
/// records into the grouped index. Owns the master record list and the index
/// until [`IngestionPipeline::into_report`] hands them over read-only.
pub struct IngestionPipeline {
    config: SourceConfig,
    source_name: String,
    records: Vec<SurveyRecord>,
    index: GroupedIndex,
    diagnostics: Vec<RowDiagnostic>,
    summary: RunSummary,
}

/// Per-source line counter state
#[derive(Debug, Default)]
struct LineState {
    line_number: usize,
    qualifying: usize,
}

impl IngestionPipeline {
    /// Create a pipeline for one configured source
    pub fn new(config: SourceConfig) -> Self {
        let source_name = if config.file_name.is_empty() {
            UNNAMED_SOURCE.to_string()
        } else {
            config.file_name.clone()
        };

        Self {
            config,
            source_name,
            records: Vec::new(),
            index: GroupedIndex::new(),
            diagnostics: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Open the configured file and ingest it.
    ///
    /// On error, rows ingested before the failure stay in the pipeline.
    #[instrument(name = "ingestion_ingest_path", skip(self), fields(source = %self.source_name))]
    pub fn ingest_path(&mut self) -> Result<()> {
        let path = self.config.path();
        let file = File::open(&path).map_err(|source| IngestionError::Open {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened survey file");

        // The reader is dropped on every return path below
        self.ingest_reader(BufReader::new(file))
    }

    /// Ingest any line source.
    ///
    /// Header counting restarts for every call. Only a failing read aborts;
    /// malformed rows are recorded as diagnostics.
    #[instrument(name = "ingestion_ingest_reader", skip(self, reader), fields(source = %self.source_name))]
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut state = LineState::default();
        let mut buf = Vec::new();
        let before = self.summary;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| IngestionError::Read {
                    source_name: self.source_name.clone(),
                    line_number: state.line_number + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }

            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }

            state.line_number += 1;
            let line = String::from_utf8_lossy(&buf);
            self.process_line(&line, &mut state);
        }

        info!(
            lines_read = self.summary.lines_read - before.lines_read,
            rows_accepted = self.summary.rows_accepted - before.rows_accepted,
            rows_rejected = self.summary.rows_rejected - before.rows_rejected,
            "survey source ingested"
        );
        Ok(())
    }

    fn process_line(&mut self, line: &str, state: &mut LineState) {
        self.summary.lines_read += 1;
        observability::record_line_read(&self.source_name);

        let separator = self.config.field_separator.as_str();
        if !tokenizer::qualifies(line, separator) {
            self.summary.lines_ignored += 1;
            trace!(line_number = state.line_number, "line does not qualify");
            return;
        }

        state.qualifying += 1;
        if state.qualifying <= self.config.header_lines {
            self.summary.header_lines_skipped += 1;
            observability::record_header_skipped(&self.source_name);
            debug!(line_number = state.line_number, "skipping header line");
            return;
        }

        let row = state.qualifying - self.config.header_lines;
        let tokens = tokenizer::tokenize(line, separator, self.config.empty_fields);

        match parser::parse_record(&tokens) {
            Ok(record) => {
                if tokens.len() > FIELD_COUNT {
                    warn!(
                        source = %self.source_name,
                        row,
                        extra = tokens.len() - FIELD_COUNT,
                        "ignoring trailing tokens"
                    );
                }
                self.accept(record);
            }
            Err(error) => {
                warn!(
                    source = %self.source_name,
                    row,
                    line_number = state.line_number,
                    error = %error,
                    "discarding malformed row"
                );
                observability::record_row_rejected(&self.source_name, error.reason());
                self.summary.rows_rejected += 1;
                self.diagnostics.push(RowDiagnostic {
                    source: self.source_name.clone(),
                    row,
                    qualifying_line: state.qualifying,
                    line_number: state.line_number,
                    error,
                });
            }
        }
    }

    fn accept(&mut self, record: SurveyRecord) {
        let magnitude = record.abs_device_offset;
        self.index
            .observe(Dimension::DeviceType, &record.device_type, magnitude);
        self.index
            .observe(Dimension::Connection, &record.connection, magnitude);
        self.index
            .observe(Dimension::ThresholdBucket, &record.threshold, magnitude);

        self.summary.rows_accepted += 1;
        observability::record_row_accepted(&self.source_name, magnitude);
        self.records.push(record);
    }

    /// Accepted records so far
    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn index(&self) -> &GroupedIndex {
        &self.index
    }

    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        &self.diagnostics
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Surrender records and aggregates as a read-only report
    pub fn into_report(self) -> SurveyReport {
        SurveyReport::new(
            vec![self.source_name],
            self.summary,
            self.records,
            self.index,
            self.diagnostics,
        )
    }

    /// Ingest the configured file and return whatever was gathered.
    ///
    /// A fatal error does not discard rows ingested before it.
    pub fn run(mut self) -> IngestionOutcome {
        let fatal = self.ingest_path().err();
        if let Some(ref err) = fatal {
            warn!(source = %self.source_name, error = %err, "ingestion aborted");
        }
        IngestionOutcome {
            report: self.into_report(),
            fatal,
        }
    }
}
