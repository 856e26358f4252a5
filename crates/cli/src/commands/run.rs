//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::SourceConfig;
use ingestion::{IngestionPipeline, SurveyReport};
use tracing::{info, warn};

use super::source::{resolve_config, source_for_file};
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::report::{print_report, ReportOutput};

/// Execute the `run` command
pub fn run_report(args: &RunArgs) -> Result<()> {
    let config = resolve_config(&args.source)?;

    let mut sources = vec![config.source.clone()];
    sources.extend(
        args.inputs
            .iter()
            .map(|input| source_for_file(input, &config.source)),
    );

    info!(
        sources = sources.len(),
        separator = %config.source.field_separator,
        header_lines = config.source.header_lines,
        "Configuration loaded"
    );

    let (report, aborted) = if let Some(ref path) = args.metrics_out {
        let (ingested, metrics) = observability::capture_metrics(|| ingest_all(sources));
        std::fs::write(path, metrics)
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
        info!(path = %path.display(), "Metrics written");
        ingested
    } else {
        ingest_all(sources)
    };

    emit(args, &report)?;

    if let Some(err) = aborted {
        warn!("Report above covers rows read before the failure");
        return Err(err.into());
    }

    let rejected = report.diagnostics().len();
    if args.strict && rejected > 0 {
        return Err(CliError::RejectedRows { count: rejected }.into());
    }

    info!(
        records = report.records().len(),
        rejected,
        "Survey report completed"
    );
    Ok(())
}

/// Ingest each source with its own pipeline and merge the reports in order.
///
/// Stops at the first fatal error, keeping what was read so far.
fn ingest_all(sources: Vec<SourceConfig>) -> (SurveyReport, Option<CliError>) {
    let mut merged: Option<SurveyReport> = None;
    let mut aborted = None;

    for source in sources {
        let path = source.path();
        info!(path = %path.display(), "Ingesting survey file");

        let outcome = IngestionPipeline::new(source).run();
        merged = Some(match merged {
            None => outcome.report,
            Some(acc) => acc.merge(outcome.report),
        });
        if let Some(err) = outcome.fatal {
            aborted = Some(CliError::ingestion_aborted(&path, err.to_string()));
            break;
        }
    }

    (merged.unwrap_or_default(), aborted)
}

fn emit(args: &RunArgs, report: &SurveyReport) -> Result<()> {
    let output = ReportOutput::new(report, args.records);

    if let Some(ref path) = args.output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_report(report);
    }

    Ok(())
}
