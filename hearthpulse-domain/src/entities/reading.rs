use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Profile, insight, and OCR payloads carry no domain behavior; the storage
// shapes are used directly.
pub use hearthpulse_data::models::{Insight, OcrReading, Profile, Trend};

/// Domain model for a blood pressure reading.
///
/// Immutable once created; the only lifecycle operation besides creation is
/// deletion by id. Pressures are deliberately unvalidated integers: the
/// classifier and aggregator are total over whatever the user entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier, assigned at creation
    pub id: String,

    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: i32,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: i32,

    /// Pulse rate in beats per minute
    pub pulse: i32,

    /// When the reading was taken, as an ISO-8601 string. The single
    /// ordering key for all sorting and grouping.
    pub timestamp: String,

    /// Optional free-text annotation
    pub note: Option<String>,
}

impl Reading {
    /// The reading's wall-clock datetime in its own recorded offset.
    ///
    /// Grouping and AM/PM placement use local time as written, not UTC.
    /// Unparseable timestamps collapse to the Unix epoch rather than erroring.
    pub fn local_datetime(&self) -> NaiveDateTime {
        parse_local(&self.timestamp)
    }

    /// The reading's local calendar date
    pub fn local_date(&self) -> NaiveDate {
        self.local_datetime().date()
    }

    /// The absolute instant of the reading, for ordering and window arithmetic
    pub fn instant(&self) -> DateTime<Utc> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return dt.with_timezone(&Utc);
        }
        // No offset present: treat the wall-clock value as UTC
        parse_local(&self.timestamp).and_utc()
    }

    /// Whether the reading falls in the AM half of its local day
    pub fn is_morning(&self) -> bool {
        use chrono::Timelike;
        self.local_datetime().hour() < 12
    }
}

fn parse_local(timestamp: &str) -> NaiveDateTime {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.naive_local();
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, format) {
            return dt;
        }
    }
    NaiveDateTime::default()
}

/// Request payload for creating a new blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReadingRequest {
    /// Systolic blood pressure in mmHg
    pub systolic: i32,

    /// Diastolic blood pressure in mmHg
    pub diastolic: i32,

    /// Pulse rate in beats per minute
    pub pulse: i32,

    /// When the reading was taken. Defaults to the current time if not provided.
    pub timestamp: Option<String>,

    /// Optional free-text annotation
    #[validate(length(max = 1000, message = "Note cannot exceed 1000 characters"))]
    pub note: Option<String>,
}

/// Blood pressure category derived from a reading.
///
/// Never persisted; recomputed on every display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    Stage1,

    /// Stage 2 Hypertension (systolic >= 140 or diastolic >= 90)
    Stage2,

    /// Hypertensive crisis (systolic > 180 and/or diastolic > 120)
    Crisis,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Normal => "Normal",
            Category::Elevated => "Elevated",
            Category::Stage1 => "Hypertension Stage 1",
            Category::Stage2 => "Hypertension Stage 2",
            Category::Crisis => "Hypertensive Crisis",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn reading_at(timestamp: &str) -> Reading {
        Reading {
            id: "r".to_string(),
            systolic: 120,
            diastolic: 80,
            pulse: 70,
            timestamp: timestamp.to_string(),
            note: None,
        }
    }

    #[test]
    fn local_date_uses_recorded_offset_not_utc() {
        // 23:50 local on Jan 1 is Jan 2 in UTC, but groups under Jan 1
        let reading = reading_at("2024-01-01T23:50:00+02:00");
        assert_eq!(reading.local_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn morning_split_is_at_noon() {
        assert!(reading_at("2024-01-01T11:59:00Z").is_morning());
        assert!(!reading_at("2024-01-01T12:00:00Z").is_morning());
    }

    #[test]
    fn naive_timestamps_parse_without_offset() {
        let reading = reading_at("2024-03-05T08:30");
        assert_eq!(
            reading.local_datetime().time(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_epoch() {
        let reading = reading_at("not a timestamp");
        assert_eq!(reading.local_date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn category_labels_are_the_clinical_names() {
        assert_eq!(Category::Stage1.to_string(), "Hypertension Stage 1");
        assert_eq!(Category::Crisis.to_string(), "Hypertensive Crisis");
    }

    #[test]
    fn categories_order_by_severity() {
        assert!(Category::Normal < Category::Elevated);
        assert!(Category::Stage2 < Category::Crisis);
    }
}
