//! Survey row parser
//!
//! Consumes the tokens of one data line in fixed positional order and builds a
//! [`SurveyRecord`]. Any missing token or failed integer conversion abandons
//! the whole row with a [`RowError`].

use contracts::{SurveyRecord, ThresholdWindow};
use tracing::debug;

use crate::classifier;
use crate::error::RowError;

/// Direct (non-threshold) fields per row
pub const DIRECT_FIELD_COUNT: usize = 26;

/// Tokens per row: direct fields plus a placeholder/label pair per window
pub const FIELD_COUNT: usize = DIRECT_FIELD_COUNT + 2 * ThresholdWindow::ALL.len();

/// Positional cursor over a row's tokens
struct FieldCursor<'a, 'b> {
    tokens: &'b [&'a str],
    position: usize,
}

impl<'a, 'b> FieldCursor<'a, 'b> {
    fn new(tokens: &'b [&'a str]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Next token, trimmed
    fn next(&mut self, field: &'static str) -> Result<&'a str, RowError> {
        let token = self
            .tokens
            .get(self.position)
            .ok_or(RowError::MissingField {
                field,
                position: self.position + 1,
            })?;
        self.position += 1;
        Ok(token.trim())
    }

    fn text(&mut self, field: &'static str) -> Result<String, RowError> {
        self.next(field).map(str::to_string)
    }

    fn upper(&mut self, field: &'static str) -> Result<String, RowError> {
        self.next(field).map(str::to_uppercase)
    }

    fn lower(&mut self, field: &'static str) -> Result<String, RowError> {
        self.next(field).map(str::to_lowercase)
    }

    /// Lenient boolean: only a case-insensitive "true" is true
    fn flag(&mut self, field: &'static str) -> Result<bool, RowError> {
        let token = self.next(field)?;
        let value = token.eq_ignore_ascii_case("true");
        if !value && !token.eq_ignore_ascii_case("false") {
            debug!(field, token, position = self.position, "non-boolean token read as false");
        }
        Ok(value)
    }

    fn integer<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, RowError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| RowError::InvalidNumber {
            field,
            position: self.position,
            value: token.to_string(),
        })
    }
}

/// Field names of the placeholder/label pair for a window
fn window_fields(window: ThresholdWindow) -> (&'static str, &'static str) {
    match window {
        ThresholdWindow::TwoSeconds => ("threshold_2sec_placeholder", "threshold_2sec"),
        ThresholdWindow::OneMinute => ("threshold_1min_placeholder", "threshold_1min"),
        ThresholdWindow::FiveMinutes => ("threshold_5min_placeholder", "threshold_5min"),
        ThresholdWindow::TenMinutes => ("threshold_10min_placeholder", "threshold_10min"),
        ThresholdWindow::FifteenMinutes => ("threshold_15min_placeholder", "threshold_15min"),
        ThresholdWindow::ThirtyMinutes => ("threshold_30min_placeholder", "threshold_30min"),
        ThresholdWindow::OneHour => ("threshold_1hour_placeholder", "threshold_1hour"),
        ThresholdWindow::TwoHours => ("threshold_2hours_placeholder", "threshold_2hours"),
    }
}

/// Parse one row's tokens into a record.
///
/// Tokens past [`FIELD_COUNT`] are not inspected.
pub fn parse_record(tokens: &[&str]) -> Result<SurveyRecord, RowError> {
    let mut f = FieldCursor::new(tokens);

    let number = f.integer::<i32>("number")?;
    let institution = f.upper("institution")?;
    let device_location = f.lower("device_location")?;
    let device_room = f.lower("device_room")?;
    let device_type = f.lower("device_type")?;
    let specification = f.lower("specification")?;
    let connection = f.lower("connection")?;
    let sync_time = f.text("sync_time")?;
    let biomed_changed = f.text("biomed_changed")?;
    let picture_taken = f.text("picture_taken")?;
    let ntp_reference_time = f.text("ntp_reference_time")?;
    let exif_reference = f.text("exif_reference")?;
    let camera_offset = f.text("camera_offset")?;
    let camera_error_margin = f.text("camera_error_margin")?;
    let device_picture_taken = f.text("device_picture_taken")?;
    let device_time_displayed = f.text("device_time_displayed")?;
    let displays_seconds = f.flag("displays_seconds")?;
    let device_error_margin = f.text("device_error_margin")?;
    let currently_on_dst = f.flag("currently_on_dst")?;
    let device_time_corrected_for_dst = f.text("device_time_corrected_for_dst")?;
    let device_time = f.text("device_time")?;
    let exif_time = f.text("exif_time")?;
    let corrected_exif_time = f.text("corrected_exif_time")?;
    let device_offset = f.text("device_offset")?;
    let abs_device_offset = f.integer::<u64>("abs_device_offset")?;
    let offset_sign = f.text("offset_sign")?;

    let mut labels: [String; 8] = Default::default();
    for (window, label) in ThresholdWindow::ALL.into_iter().zip(labels.iter_mut()) {
        let (placeholder, label_field) = window_fields(window);
        f.next(placeholder)?;
        *label = f.lower(label_field)?;
    }
    let exceeds = classifier::classify(&labels);
    let [threshold, ..] = labels;

    Ok(SurveyRecord {
        number,
        institution,
        device_location,
        device_room,
        device_type,
        specification,
        connection,
        sync_time,
        biomed_changed,
        picture_taken,
        ntp_reference_time,
        exif_reference,
        camera_offset,
        camera_error_margin,
        device_picture_taken,
        device_time_displayed,
        displays_seconds,
        device_error_margin,
        currently_on_dst,
        device_time_corrected_for_dst,
        device_time,
        exif_time,
        corrected_exif_time,
        device_offset,
        abs_device_offset,
        offset_sign,
        threshold,
        exceeds,
    })
}
