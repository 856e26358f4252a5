//! Mock Survey Example
//!
//! Ingests a generated survey through the full pipeline without any file on disk.
//!
//! Run with: cargo run -p survey_demos --bin mock_survey [config.toml]

use std::io::Cursor;

use aggregation::Dimension;
use config_loader::ConfigLoader;
use contracts::SourceConfig;
use ingestion::{mock_survey, IngestionPipeline, MockSurveyRow};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Survey Demo");

    // ==== Stage 1: Use default layout or load it from a config file ====
    let source = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading survey config");
        ConfigLoader::load_from_path(std::path::Path::new(&path))?.source
    } else {
        SourceConfig::new(".", "mock-survey.txt")
    };

    // ==== Stage 2: Generate survey content ====
    let rows = [
        MockSurveyRow::new(1)
            .institution("General")
            .device("Monitor", "acme-x100", "Networked")
            .offset_ms(1_500),
        MockSurveyRow::new(2)
            .institution("General")
            .device("Monitor", "acme-x200", "Standalone")
            .offset_ms(-95_000),
        MockSurveyRow::new(3)
            .institution("General")
            .device("Infusion Pump", "flow-9", "Standalone")
            .offset_ms(0),
        MockSurveyRow::new(4)
            .institution("General")
            .device("Ventilator", "breeze", "Networked")
            .offset_ms(3_900_000),
    ];
    let content = mock_survey(
        source.header_lines,
        &rows,
        &source.field_separator,
    );

    // ==== Stage 3: Ingest ====
    let mut pipeline = IngestionPipeline::new(source);
    pipeline.ingest_reader(Cursor::new(content))?;
    let report = pipeline.into_report();

    tracing::info!(
        records = report.records().len(),
        rejected = report.diagnostics().len(),
        "Survey ingested"
    );

    // ==== Stage 4: Print grouped statistics ====
    for dimension in Dimension::ALL {
        println!("{dimension}");
        for (key, stats) in report.table(dimension) {
            println!("  {key:<36} {stats}");
        }
    }

    for (window, count) in report.exceedance_counts() {
        println!("> {:<8} {count}", window.name());
    }

    Ok(())
}
