//! # Integration Tests
//!
//! End-to-end tests across crates.
//!
//! Covers:
//! - Contract snapshots
//! - Config file -> pipeline -> report on real files
//! - Aggregation laws over randomized surveys

#[cfg(test)]
mod contract_tests {
    use contracts::{ThresholdWindow, NO_OFFSET};

    #[test]
    fn test_window_contract() {
        let names: Vec<_> = ThresholdWindow::ALL.iter().map(|w| w.name()).collect();
        assert_eq!(
            names,
            ["2 sec", "1 min", "5 min", "10 min", "15 min", "30 min", "1 hour", "2 hours"]
        );
        assert_eq!(NO_OFFSET, "no offset");
        assert_eq!(
            ThresholdWindow::TenMinutes.below_sentinel(),
            "offset less than 10 min"
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;

    use aggregation::Dimension;
    use config_loader::ConfigLoader;
    use contracts::{SourceConfig, ThresholdWindow};
    use ingestion::{mock_survey, IngestionPipeline, MockSurveyRow, RowError, SurveyReport};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn write_survey(dir: &Path, name: &str, rows: &[MockSurveyRow]) -> SourceConfig {
        std::fs::write(dir.join(name), mock_survey(5, rows, "|")).unwrap();
        SourceConfig::new(dir, name)
    }

    fn ingest(source: SourceConfig) -> SurveyReport {
        IngestionPipeline::new(source)
            .run()
            .into_result()
            .expect("ingestion should succeed")
    }

    fn sample_rows() -> Vec<MockSurveyRow> {
        vec![
            MockSurveyRow::new(1)
                .device("Monitor", "acme-x100", "Networked")
                .offset_ms(45_000),
            MockSurveyRow::new(2)
                .device("Monitor", "acme-x200", "Standalone")
                .offset_ms(-120_000),
            MockSurveyRow::new(3)
                .device("Pump", "flow-9", "Standalone")
                .offset_ms(0),
            MockSurveyRow::new(4)
                .device("Pump", "flow-9", "Networked")
                .offset_ms(7_500_000),
        ]
    }

    /// Config file -> loader -> pipeline -> report
    #[test]
    fn test_e2e_config_file_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        write_survey(dir.path(), "site_a.txt", &sample_rows());

        let config_path = dir.path().join("survey.toml");
        std::fs::write(
            &config_path,
            format!(
                "[source]\ndirectory = {:?}\nfile_name = \"site_a.txt\"\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let config = ConfigLoader::load_from_path(&config_path).unwrap();
        let report = ingest(config.source);

        assert_eq!(report.summary().header_lines_skipped, 5);
        assert_eq!(report.records().len(), 4);
        assert!(report.diagnostics().is_empty());

        let devices = report.table(Dimension::DeviceType);
        assert_eq!(devices.len(), 2);
        let (key, monitor) = &devices[0];
        assert_eq!(key, "monitor");
        assert_eq!(monitor.count, 2);
        assert_eq!(monitor.min, Some(45_000));
        assert_eq!(monitor.max, Some(120_000));
        assert_eq!(monitor.mean, Some(82_500.0));

        let pump = report.index().get(Dimension::DeviceType, "pump").unwrap();
        assert_eq!(pump.min(), Some(0));
        assert_eq!(pump.max(), Some(7_500_000));

        let networked = report.index().get(Dimension::Connection, "networked").unwrap();
        assert_eq!(networked.count(), 2);

        let counts = report.exceedance_counts();
        assert_eq!(counts[0], (ThresholdWindow::TwoSeconds, 3));
        assert_eq!(counts[1], (ThresholdWindow::OneMinute, 2));
        assert_eq!(counts[7], (ThresholdWindow::TwoHours, 1));

        let no_offset = report.records().iter().find(|r| r.number == 3).unwrap();
        assert_eq!(no_offset.threshold, "no offset");
        assert!(!no_offset.exceeds.gt_2sec);
    }

    #[test]
    fn test_e2e_malformed_rows_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let mut rows = sample_rows();
        rows[1].abs_device_offset = "lots".into();
        rows[3].labels[7].clear();
        let source = write_survey(dir.path(), "site_b.txt", &rows);

        let report = ingest(source);
        assert_eq!(report.summary().rows_accepted, 2);
        assert_eq!(report.summary().rows_rejected, 2);

        let first = &report.diagnostics()[0];
        assert_eq!(first.row, 2);
        assert_eq!(first.line_number, 7);
        assert!(matches!(
            first.error,
            RowError::InvalidNumber { field: "abs_device_offset", .. }
        ));

        let second = &report.diagnostics()[1];
        assert_eq!(second.row, 4);
        assert!(matches!(second.error, RowError::MissingField { .. }));

        let numbers: Vec<_> = report.records().iter().map(|r| r.number).collect();
        assert_eq!(numbers, [1, 3]);
        assert_eq!(report.index().total_count(Dimension::DeviceType), 2);
    }

    #[test]
    fn test_e2e_reingest_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_survey(dir.path(), "site_a.txt", &sample_rows());

        let first = ingest(source.clone());
        let second = ingest(source);

        assert_eq!(first.records(), second.records());
        assert_eq!(first.index(), second.index());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Ingesting two files separately and merging matches one combined file
    #[test]
    fn test_e2e_merge_matches_combined_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let rows = sample_rows();
        let a = write_survey(dir.path(), "a.txt", &rows[..2]);
        let b = write_survey(dir.path(), "b.txt", &rows[2..]);
        let combined = write_survey(dir.path(), "all.txt", &rows);

        let merged = ingest(a).merge(ingest(b));
        let single = ingest(combined);

        assert_eq!(merged.sources(), ["a.txt", "b.txt"]);
        assert_eq!(merged.records(), single.records());
        assert_eq!(merged.index(), single.index());
        assert_eq!(merged.summary().rows_accepted, single.summary().rows_accepted);
        assert_eq!(merged.summary().header_lines_skipped, 10);
    }

    /// Every dimension partitions the accepted records
    #[test]
    fn test_e2e_randomized_partition() {
        const DEVICES: [&str; 4] = ["Monitor", "Pump", "Ventilator", "Infusion"];
        const CONNECTIONS: [&str; 2] = ["Networked", "Standalone"];

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let rows: Vec<_> = (1..=200)
            .map(|n| {
                MockSurveyRow::new(n)
                    .device(
                        DEVICES[rng.random_range(0..DEVICES.len())],
                        "model-a",
                        CONNECTIONS[rng.random_range(0..CONNECTIONS.len())],
                    )
                    .offset_ms(rng.random_range(-10_000_000..10_000_000))
            })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let report = ingest(write_survey(dir.path(), "random.txt", &rows));
        assert_eq!(report.records().len(), 200);

        let total: u128 = report
            .records()
            .iter()
            .map(|r| u128::from(r.abs_device_offset))
            .sum();
        let global_min = report.records().iter().map(|r| r.abs_device_offset).min();
        let global_max = report.records().iter().map(|r| r.abs_device_offset).max();

        for dimension in Dimension::ALL {
            let table = report.table(dimension);
            assert_eq!(table.iter().map(|(_, s)| s.count).sum::<u64>(), 200);
            assert_eq!(table.iter().map(|(_, s)| s.sum).sum::<u128>(), total);
            assert_eq!(table.iter().filter_map(|(_, s)| s.min).min(), global_min);
            assert_eq!(table.iter().filter_map(|(_, s)| s.max).max(), global_max);
            for (_, stats) in &table {
                let (min, max, mean) = (stats.min.unwrap(), stats.max.unwrap(), stats.mean.unwrap());
                assert!(min as f64 <= mean && mean <= max as f64);
            }
        }
    }

    #[test]
    fn test_e2e_report_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let report = ingest(write_survey(dir.path(), "site_a.txt", &sample_rows()));

        let json = serde_json::to_value(&report).unwrap();
        let devices = json["index"]["device_type"].as_object().unwrap();
        assert_eq!(devices.keys().collect::<Vec<_>>(), ["monitor", "pump"]);
        assert_eq!(devices["monitor"]["count"], 2);
        assert_eq!(json["summary"]["rows_accepted"], 4);
        assert_eq!(json["records"][0]["institution"], "HOSP");
    }

    /// Ingestion counters agree with the report's run summary
    #[test]
    fn test_e2e_metrics_match_summary() {
        let dir = tempfile::tempdir().unwrap();
        let mut rows = sample_rows();
        rows[2].number = "three".into();
        let source = write_survey(dir.path(), "site_c.txt", &rows);

        let (report, metrics) = observability::capture_metrics(|| ingest(source));
        let summary = report.summary();
        assert_eq!(summary.rows_accepted, 3);
        assert_eq!(summary.rows_rejected, 1);

        for (name, value) in [
            ("dts_lines_read_total", summary.lines_read),
            ("dts_header_lines_skipped_total", summary.header_lines_skipped),
            ("dts_rows_accepted_total", summary.rows_accepted),
        ] {
            let line = format!("{name}{{source=\"site_c.txt\"}} {value}");
            assert!(metrics.contains(&line), "missing {line} in {metrics}");
        }
        assert!(metrics.contains("reason=\"invalid_number\""), "{metrics}");
    }

    #[test]
    fn test_e2e_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = IngestionPipeline::new(SourceConfig::new(dir.path(), "absent.txt")).run();
        assert!(!outcome.is_success());
        assert!(outcome.report.records().is_empty());
    }
}
