//! Threshold classification
//!
//! A label "exceeds" its window unless it is one of the window's sentinels:
//! `"no offset"` or `"offset less than <window>"`. Comparison is
//! case-insensitive after trimming. Windows are classified independently.

use contracts::{ThresholdFlags, ThresholdWindow, NO_OFFSET};

/// Whether `label` marks an offset exceeding `window`
pub fn exceeds(window: ThresholdWindow, label: &str) -> bool {
    let label = label.trim();
    !(label.eq_ignore_ascii_case(NO_OFFSET)
        || label.eq_ignore_ascii_case(&window.below_sentinel()))
}

/// Classify one label per window, in [`ThresholdWindow::ALL`] order
pub fn classify<S: AsRef<str>>(labels: &[S; 8]) -> ThresholdFlags {
    let mut flags = ThresholdFlags::default();
    for (window, label) in ThresholdWindow::ALL.into_iter().zip(labels) {
        flags.set(window, exceeds(window, label.as_ref()));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_never_exceed() {
        for window in ThresholdWindow::ALL {
            assert!(!exceeds(window, "no offset"), "{window}");
            assert!(!exceeds(window, "No Offset"), "{window}");
            assert!(!exceeds(window, "  NO OFFSET "), "{window}");

            let below = format!("offset less than {}", window.name());
            assert!(!exceeds(window, &below), "{window}");
            assert!(!exceeds(window, &below.to_uppercase()), "{window}");
        }
    }

    #[test]
    fn test_other_labels_exceed() {
        for window in ThresholdWindow::ALL {
            let above = format!("offset greater than {}", window.name());
            assert!(exceeds(window, &above), "{window}");
            assert!(exceeds(window, ""), "{window}");
            assert!(exceeds(window, "n/a"), "{window}");
        }
    }

    #[test]
    fn test_sentinel_of_another_window_exceeds() {
        // "less than 1 min" says nothing about staying under 2 sec
        assert!(exceeds(ThresholdWindow::TwoSeconds, "offset less than 1 min"));
        assert!(!exceeds(ThresholdWindow::OneMinute, "offset less than 1 min"));
        assert!(exceeds(ThresholdWindow::TwoHours, "offset less than 1 hour"));
    }

    #[test]
    fn test_match_is_exact() {
        assert!(exceeds(ThresholdWindow::OneHour, "offset less than 1 hours"));
        assert!(exceeds(ThresholdWindow::TwoHours, "offset less than 2 hour"));
        assert!(exceeds(ThresholdWindow::FiveMinutes, "offset  less than 5 min"));
    }

    #[test]
    fn test_windows_need_not_be_monotonic() {
        let labels = [
            "no offset",
            "offset greater than 1 min",
            "offset less than 5 min",
            "no offset",
            "offset greater than 15 min",
            "no offset",
            "no offset",
            "offset less than 2 hours",
        ];
        let flags = classify(&labels);
        assert!(!flags.gt_2sec);
        assert!(flags.gt_1min);
        assert!(!flags.gt_5min);
        assert!(!flags.gt_10min);
        assert!(flags.gt_15min);
        assert!(!flags.gt_30min);
        assert!(!flags.gt_1hour);
        assert!(!flags.gt_2hours);
    }
}
