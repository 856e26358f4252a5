//! SurveyRecord - one parsed survey row

use serde::{Deserialize, Serialize};

use crate::ThresholdWindow;

/// One accepted survey row.
///
/// Textual context fields are already case-normalized. Process timestamps and
/// markers are carried verbatim. `abs_device_offset` is the only value that
/// feeds the statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    /// Row sequence number as written in the survey
    pub number: i32,
    /// Institution, upper-cased
    pub institution: String,
    /// Device location (unit), lower-cased
    pub device_location: String,
    /// Device room, lower-cased
    pub device_room: String,
    /// Device type, lower-cased
    pub device_type: String,
    /// Manufacturer / model, lower-cased
    pub specification: String,
    /// Connection mode ("networked" / "standalone"), lower-cased
    pub connection: String,

    pub sync_time: String,
    pub biomed_changed: String,
    /// Picture of the reference clock
    pub picture_taken: String,
    pub ntp_reference_time: String,
    pub exif_reference: String,
    pub camera_offset: String,
    pub camera_error_margin: String,
    /// Picture of the device display
    pub device_picture_taken: String,
    pub device_time_displayed: String,
    pub displays_seconds: bool,
    pub device_error_margin: String,
    pub currently_on_dst: bool,
    pub device_time_corrected_for_dst: String,
    pub device_time: String,
    pub exif_time: String,
    pub corrected_exif_time: String,

    /// Signed offset as written
    pub device_offset: String,
    /// Offset magnitude in milliseconds
    pub abs_device_offset: u64,
    /// Offset sign in words
    pub offset_sign: String,

    /// Bucket label of the 2 second window, lower-cased
    pub threshold: String,
    /// Per-window exceedance flags
    pub exceeds: ThresholdFlags,
}

/// One "exceeds window" flag per threshold window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThresholdFlags {
    pub gt_2sec: bool,
    pub gt_1min: bool,
    pub gt_5min: bool,
    pub gt_10min: bool,
    pub gt_15min: bool,
    pub gt_30min: bool,
    pub gt_1hour: bool,
    pub gt_2hours: bool,
}

impl ThresholdFlags {
    /// Flag for a window
    pub fn get(&self, window: ThresholdWindow) -> bool {
        match window {
            ThresholdWindow::TwoSeconds => self.gt_2sec,
            ThresholdWindow::OneMinute => self.gt_1min,
            ThresholdWindow::FiveMinutes => self.gt_5min,
            ThresholdWindow::TenMinutes => self.gt_10min,
            ThresholdWindow::FifteenMinutes => self.gt_15min,
            ThresholdWindow::ThirtyMinutes => self.gt_30min,
            ThresholdWindow::OneHour => self.gt_1hour,
            ThresholdWindow::TwoHours => self.gt_2hours,
        }
    }

    /// Set the flag for a window
    pub fn set(&mut self, window: ThresholdWindow, exceeds: bool) {
        let slot = match window {
            ThresholdWindow::TwoSeconds => &mut self.gt_2sec,
            ThresholdWindow::OneMinute => &mut self.gt_1min,
            ThresholdWindow::FiveMinutes => &mut self.gt_5min,
            ThresholdWindow::TenMinutes => &mut self.gt_10min,
            ThresholdWindow::FifteenMinutes => &mut self.gt_15min,
            ThresholdWindow::ThirtyMinutes => &mut self.gt_30min,
            ThresholdWindow::OneHour => &mut self.gt_1hour,
            ThresholdWindow::TwoHours => &mut self.gt_2hours,
        };
        *slot = exceeds;
    }

    /// Windows whose flag is set
    pub fn exceeded(&self) -> impl Iterator<Item = ThresholdWindow> + '_ {
        ThresholdWindow::ALL
            .into_iter()
            .filter(move |w| self.get(*w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_get_set() {
        let mut flags = ThresholdFlags::default();
        flags.set(ThresholdWindow::FifteenMinutes, true);
        flags.set(ThresholdWindow::TwoSeconds, true);

        assert!(flags.gt_15min);
        assert!(flags.get(ThresholdWindow::TwoSeconds));
        assert!(!flags.get(ThresholdWindow::OneHour));

        let exceeded: Vec<_> = flags.exceeded().collect();
        assert_eq!(
            exceeded,
            vec![ThresholdWindow::TwoSeconds, ThresholdWindow::FifteenMinutes]
        );
    }

    #[test]
    fn test_flags_serialize_field_names() {
        let json = serde_json::to_string(&ThresholdFlags::default()).unwrap();
        assert!(json.contains("\"gt_2sec\":false"));
        assert!(json.contains("\"gt_2hours\":false"));
    }
}
