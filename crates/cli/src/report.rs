//! Report rendering (text tables and JSON).

use aggregation::Dimension;
use contracts::SurveyRecord;
use ingestion::{RowDiagnostic, RunSummary, SurveyReport};
use serde::Serialize;

/// JSON shape of a report
#[derive(Serialize)]
pub struct ReportOutput<'a> {
    sources: &'a [String],
    summary: &'a RunSummary,
    tables: Tables,
    exceedance: Vec<Exceedance>,
    diagnostics: &'a [RowDiagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [SurveyRecord]>,
}

#[derive(Serialize)]
struct Tables {
    device_type: Vec<TableRow>,
    connection: Vec<TableRow>,
    threshold_bucket: Vec<TableRow>,
}

#[derive(Serialize)]
struct TableRow {
    key: String,
    count: u64,
    mean: Option<f64>,
    min: Option<u64>,
    max: Option<u64>,
}

#[derive(Serialize)]
struct Exceedance {
    window: String,
    records: usize,
}

impl<'a> ReportOutput<'a> {
    pub fn new(report: &'a SurveyReport, include_records: bool) -> Self {
        Self {
            sources: report.sources(),
            summary: report.summary(),
            tables: Tables {
                device_type: rows(report, Dimension::DeviceType),
                connection: rows(report, Dimension::Connection),
                threshold_bucket: rows(report, Dimension::ThresholdBucket),
            },
            exceedance: report
                .exceedance_counts()
                .into_iter()
                .map(|(window, records)| Exceedance {
                    window: window.name().to_string(),
                    records,
                })
                .collect(),
            diagnostics: report.diagnostics(),
            records: include_records.then(|| report.records()),
        }
    }
}

fn rows(report: &SurveyReport, dimension: Dimension) -> Vec<TableRow> {
    report
        .table(dimension)
        .into_iter()
        .map(|(key, s)| TableRow {
            key,
            count: s.count,
            mean: s.mean,
            min: s.min,
            max: s.max,
        })
        .collect()
}

fn dimension_title(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::DeviceType => "By device type",
        Dimension::Connection => "By connection",
        Dimension::ThresholdBucket => "By threshold bucket",
    }
}

/// Print a human-readable report
pub fn print_report(report: &SurveyReport) {
    let summary = report.summary();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Device Time Survey Report                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📄 Sources");
    for (i, source) in report.sources().iter().enumerate() {
        let prefix = if i == report.sources().len() - 1 { "└─" } else { "├─" };
        println!("   {} {}", prefix, source);
    }

    println!("\n📊 Overview");
    println!("   ├─ Lines read: {}", summary.lines_read);
    println!("   ├─ Header lines skipped: {}", summary.header_lines_skipped);
    println!("   ├─ Non-data lines: {}", summary.lines_ignored);
    println!("   ├─ Records accepted: {}", summary.rows_accepted);
    println!("   └─ Rows rejected: {}", summary.rows_rejected);

    for dimension in Dimension::ALL {
        let table = report.table(dimension);
        println!("\n📈 {} ({})", dimension_title(dimension), table.len());
        for (i, (key, stats)) in table.iter().enumerate() {
            let prefix = if i == table.len() - 1 { "└─" } else { "├─" };
            println!("   {} {:<28} {:#}", prefix, key, stats);
        }
    }

    let total = report.records().len();
    println!("\n⏱  Offsets exceeding window");
    let counts = report.exceedance_counts();
    for (i, (window, count)) in counts.iter().enumerate() {
        let prefix = if i == counts.len() - 1 { "└─" } else { "├─" };
        let pct = if total > 0 {
            *count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!("   {} > {:<8} {:>6} ({:.1}%)", prefix, window.name(), count, pct);
    }

    if !report.diagnostics().is_empty() {
        println!("\n⚠️  Rejected rows");
        for diag in report.diagnostics() {
            println!("   - {}", diag);
        }
    }

    println!();
}
