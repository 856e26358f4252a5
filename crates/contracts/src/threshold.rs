//! Threshold windows
//!
//! Each survey row classifies its offset against eight named windows. A row
//! "exceeds" a window unless its label for that window is one of the window's
//! two sentinel phrases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label shared by every window: the device showed no offset at all
pub const NO_OFFSET: &str = "no offset";

/// Prefix of the per-window sentinel, e.g. "offset less than 5 min"
pub const OFFSET_LESS_THAN: &str = "offset less than";

/// Named time window used to bucket offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdWindow {
    TwoSeconds,
    OneMinute,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
}

impl ThresholdWindow {
    /// All windows in the order their columns appear in a survey row
    pub const ALL: [ThresholdWindow; 8] = [
        Self::TwoSeconds,
        Self::OneMinute,
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
    ];

    /// Phrase used for the window in survey labels
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoSeconds => "2 sec",
            Self::OneMinute => "1 min",
            Self::FiveMinutes => "5 min",
            Self::TenMinutes => "10 min",
            Self::FifteenMinutes => "15 min",
            Self::ThirtyMinutes => "30 min",
            Self::OneHour => "1 hour",
            Self::TwoHours => "2 hours",
        }
    }

    /// Window length in seconds
    pub fn as_secs(&self) -> u64 {
        match self {
            Self::TwoSeconds => 2,
            Self::OneMinute => 60,
            Self::FiveMinutes => 5 * 60,
            Self::TenMinutes => 10 * 60,
            Self::FifteenMinutes => 15 * 60,
            Self::ThirtyMinutes => 30 * 60,
            Self::OneHour => 60 * 60,
            Self::TwoHours => 2 * 60 * 60,
        }
    }

    /// The "offset less than <window>" sentinel for this window
    pub fn below_sentinel(&self) -> String {
        format!("{OFFSET_LESS_THAN} {}", self.name())
    }
}

impl fmt::Display for ThresholdWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
