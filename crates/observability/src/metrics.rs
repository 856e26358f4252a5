//! Ingestion metrics
//!
//! Thin wrappers over the `metrics` facade so metric names live in one place.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Run `f` against a private Prometheus recorder.
///
/// Returns `f`'s result and everything it recorded on this thread, rendered in
/// the Prometheus text exposition format.
pub fn capture_metrics<T>(f: impl FnOnce() -> T) -> (T, String) {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let value = ::metrics::with_local_recorder(&recorder, f);
    (value, handle.render())
}

/// Record one physical line read from a survey source
pub fn record_line_read(source: &str) {
    counter!("dts_lines_read_total", "source" => source.to_string()).increment(1);
}

/// Record one qualifying line discarded as header
pub fn record_header_skipped(source: &str) {
    counter!("dts_header_lines_skipped_total", "source" => source.to_string()).increment(1);
}

/// Record an accepted row and its offset magnitude (ms)
pub fn record_row_accepted(source: &str, magnitude_ms: u64) {
    counter!("dts_rows_accepted_total", "source" => source.to_string()).increment(1);
    histogram!("dts_abs_device_offset_ms").record(magnitude_ms as f64);
}

/// Record a rejected row
///
/// `reason` should be a short stable tag (e.g. "missing_field").
pub fn record_row_rejected(source: &str, reason: &'static str) {
    counter!(
        "dts_rows_rejected_total",
        "source" => source.to_string(),
        "reason" => reason
    )
    .increment(1);
}
