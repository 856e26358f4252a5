//! Mock survey rows
//!
//! Builds syntactically valid survey lines for tests without real survey files.

use contracts::ThresholdWindow;

/// One survey row as raw tokens.
///
/// Fields are public so tests can corrupt any single column.
#[derive(Debug, Clone)]
pub struct MockSurveyRow {
    pub number: String,
    pub institution: String,
    pub device_location: String,
    pub device_room: String,
    pub device_type: String,
    pub specification: String,
    pub connection: String,
    pub sync_time: String,
    pub biomed_changed: String,
    pub picture_taken: String,
    pub ntp_reference_time: String,
    pub exif_reference: String,
    pub camera_offset: String,
    pub camera_error_margin: String,
    pub device_picture_taken: String,
    pub device_time_displayed: String,
    pub displays_seconds: String,
    pub device_error_margin: String,
    pub currently_on_dst: String,
    pub device_time_corrected_for_dst: String,
    pub device_time: String,
    pub exif_time: String,
    pub corrected_exif_time: String,
    pub device_offset: String,
    pub abs_device_offset: String,
    pub offset_sign: String,
    /// Token written before every window label
    pub placeholder: String,
    /// One label per window, in [`ThresholdWindow::ALL`] order
    pub labels: [String; 8],
}

impl Default for MockSurveyRow {
    fn default() -> Self {
        let mut row = Self {
            number: "1".into(),
            institution: "Hosp".into(),
            device_location: "ICU".into(),
            device_room: "Room1".into(),
            device_type: "Monitor".into(),
            specification: "acme-x100".into(),
            connection: "Networked".into(),
            sync_time: "2013-03-12 10:15:00".into(),
            biomed_changed: "no".into(),
            picture_taken: "yes".into(),
            ntp_reference_time: "10:15:02".into(),
            exif_reference: "10:15:03".into(),
            camera_offset: "1000".into(),
            camera_error_margin: "500".into(),
            device_picture_taken: "yes".into(),
            device_time_displayed: "10:15:47".into(),
            displays_seconds: "true".into(),
            device_error_margin: "1000".into(),
            currently_on_dst: "false".into(),
            device_time_corrected_for_dst: "10:15:47".into(),
            device_time: "10:15:47".into(),
            exif_time: "10:15:48".into(),
            corrected_exif_time: "10:15:47".into(),
            device_offset: String::new(),
            abs_device_offset: String::new(),
            offset_sign: String::new(),
            placeholder: "threshold".into(),
            labels: Default::default(),
        };
        row.set_offset(0);
        row
    }
}

impl MockSurveyRow {
    /// Row with the given sequence number and a zero offset
    pub fn new(number: i32) -> Self {
        Self {
            number: number.to_string(),
            ..Default::default()
        }
    }

    pub fn institution(mut self, institution: &str) -> Self {
        self.institution = institution.into();
        self
    }

    pub fn location(mut self, location: &str, room: &str) -> Self {
        self.device_location = location.into();
        self.device_room = room.into();
        self
    }

    pub fn device(mut self, device_type: &str, specification: &str, connection: &str) -> Self {
        self.device_type = device_type.into();
        self.specification = specification.into();
        self.connection = connection.into();
        self
    }

    /// Set the signed offset and derive magnitude, sign and all window labels
    pub fn offset_ms(mut self, offset_ms: i64) -> Self {
        self.set_offset(offset_ms);
        self
    }

    /// Override the label of one window
    pub fn label(mut self, window: ThresholdWindow, label: &str) -> Self {
        if let Some(idx) = ThresholdWindow::ALL.iter().position(|w| *w == window) {
            self.labels[idx] = label.into();
        }
        self
    }

    fn set_offset(&mut self, offset_ms: i64) {
        let magnitude = offset_ms.unsigned_abs();
        self.device_offset = offset_ms.to_string();
        self.abs_device_offset = magnitude.to_string();
        self.offset_sign = match offset_ms.signum() {
            1 => "positive",
            -1 => "negative",
            _ => "none",
        }
        .into();

        for (idx, window) in ThresholdWindow::ALL.iter().enumerate() {
            self.labels[idx] = if magnitude == 0 {
                "No offset".to_string()
            } else if magnitude < window.as_secs() * 1000 {
                format!("Offset less than {}", window.name())
            } else {
                format!("Offset greater than {}", window.name())
            };
        }
    }

    /// All 42 tokens in column order
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![
            self.number.clone(),
            self.institution.clone(),
            self.device_location.clone(),
            self.device_room.clone(),
            self.device_type.clone(),
            self.specification.clone(),
            self.connection.clone(),
            self.sync_time.clone(),
            self.biomed_changed.clone(),
            self.picture_taken.clone(),
            self.ntp_reference_time.clone(),
            self.exif_reference.clone(),
            self.camera_offset.clone(),
            self.camera_error_margin.clone(),
            self.device_picture_taken.clone(),
            self.device_time_displayed.clone(),
            self.displays_seconds.clone(),
            self.device_error_margin.clone(),
            self.currently_on_dst.clone(),
            self.device_time_corrected_for_dst.clone(),
            self.device_time.clone(),
            self.exif_time.clone(),
            self.corrected_exif_time.clone(),
            self.device_offset.clone(),
            self.abs_device_offset.clone(),
            self.offset_sign.clone(),
        ];
        for label in &self.labels {
            tokens.push(self.placeholder.clone());
            tokens.push(label.clone());
        }
        tokens
    }

    /// Render as one survey line
    pub fn to_line(&self, separator: &str) -> String {
        self.tokens().join(separator)
    }
}

/// Header lines as they appear at the top of survey sheets.
///
/// Every line contains the separator, so each counts toward the header skip.
pub fn mock_header(count: usize, separator: &str) -> Vec<String> {
    (0..count)
        .map(|i| match i {
            0 => format!("Device Time Study{separator}Survey export"),
            1 => format!("Institution{separator}HOSP"),
            2 => format!("Surveyor{separator}biomed"),
            _ => format!("Header {i}{separator}{separator}"),
        })
        .collect()
}

/// A complete survey file: header lines followed by the rows
pub fn mock_survey(header_lines: usize, rows: &[MockSurveyRow], separator: &str) -> String {
    let mut lines = mock_header(header_lines, separator);
    lines.extend(rows.iter().map(|row| row.to_line(separator)));
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_offset() {
        let row = MockSurveyRow::new(1).offset_ms(-90_000);
        assert_eq!(row.abs_device_offset, "90000");
        assert_eq!(row.offset_sign, "negative");
        assert_eq!(row.labels[0], "Offset greater than 2 sec");
        assert_eq!(row.labels[1], "Offset greater than 1 min");
        assert_eq!(row.labels[2], "Offset less than 5 min");
        assert_eq!(row.labels[7], "Offset less than 2 hours");
    }

    #[test]
    fn test_mock_survey_layout() {
        let content = mock_survey(5, &[MockSurveyRow::new(1), MockSurveyRow::new(2)], "|");
        assert_eq!(content.lines().count(), 7);
        assert!(content.lines().all(|l| l.find('|').is_some_and(|i| i > 0)));
    }
}
