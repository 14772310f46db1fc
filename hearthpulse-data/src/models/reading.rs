use serde::{Deserialize, Serialize};

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique identifier for the reading
    pub id: String,

    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: i32,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: i32,

    /// Pulse rate in beats per minute
    pub pulse: i32,

    /// When the reading was taken, as an ISO-8601 string
    pub timestamp: String,

    /// Optional free-text annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Storage model for the user profile.
///
/// Replaced wholesale on every update; the string fields mirror how the
/// client submits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub conditions: String,

    /// Optional display name, used in the log sheet header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional target systolic pressure in mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_goal: Option<i32>,

    /// Optional API key for the hosted AI service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: "30".to_string(),
            gender: "Other".to_string(),
            weight: "150".to_string(),
            height: "5.08".to_string(),
            conditions: String::new(),
            name: None,
            bp_goal: None,
            api_key: None,
        }
    }
}

/// Trend classification returned by the AI service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Insufficient,
}

/// AI-generated insight report over the current reading set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Summary of the user's recent readings
    pub summary: String,

    /// Ordered list of actionable recommendations
    pub recommendations: Vec<String>,

    /// Overall trend classification
    pub trend: Trend,

    /// When the insight was generated, as an ISO-8601 string
    pub generated_at: String,
}

/// Values extracted from a photo of a blood pressure monitor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrReading {
    pub systolic: i32,
    pub diastolic: i32,
    pub pulse: i32,
}
