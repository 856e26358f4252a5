//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{SurveyConfig, ThresholdWindow, NO_OFFSET};
use serde::Serialize;
use tracing::info;

use super::source::resolve_config;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    source: SourceInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    windows: Vec<WindowInfo>,
}

#[derive(Serialize)]
struct SourceInfo {
    path: String,
    exists: bool,
    field_separator: String,
    header_lines: usize,
    empty_fields: String,
}

#[derive(Serialize)]
struct WindowInfo {
    name: &'static str,
    seconds: u64,
    below_label: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config = resolve_config(&args.source)?;
    info!(path = %config.source.path().display(), "Loading configuration info");

    let info = build_config_info(&config, args.windows);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn build_config_info(config: &SurveyConfig, with_windows: bool) -> ConfigInfo {
    let path = config.source.path();
    let windows = if with_windows {
        ThresholdWindow::ALL
            .into_iter()
            .map(|w| WindowInfo {
                name: w.name(),
                seconds: w.as_secs(),
                below_label: w.below_sentinel(),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", config.version),
        source: SourceInfo {
            exists: path.exists(),
            path: path.display().to_string(),
            field_separator: config.source.field_separator.clone(),
            header_lines: config.source.header_lines,
            empty_fields: format!("{:?}", config.source.empty_fields),
        },
        windows,
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Survey Configuration Info                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📋 Version: {}\n", info.version);

    let source = &info.source;
    println!("📄 Source");
    println!(
        "   ├─ File: {}{}",
        source.path,
        if source.exists { "" } else { " (missing)" }
    );
    println!("   ├─ Field separator: {:?}", source.field_separator);
    println!("   ├─ Header lines: {}", source.header_lines);
    println!("   └─ Empty fields: {}", source.empty_fields);

    if !info.windows.is_empty() {
        println!("\n⏱  Threshold windows (exceeded unless label is {:?} or below)", NO_OFFSET);
        for (i, w) in info.windows.iter().enumerate() {
            let prefix = if i == info.windows.len() - 1 { "└─" } else { "├─" };
            println!(
                "   {} {:<8} {:>5}s  below: {:?}",
                prefix, w.name, w.seconds, w.below_label
            );
        }
    }

    println!();
}
