// Hosted AI service client.
//
// Two single-shot calls: insight generation over the reading log, and
// optical extraction of values from a device photo. Both degrade to a
// fallback payload instead of surfacing network errors to callers.
mod gemini;

pub use gemini::{fallback_insight, insufficient_data_insight, GeminiClient};

use async_trait::async_trait;

use crate::models::{Insight, OcrReading, Profile, Reading};

/// Trait for the hosted AI service.
///
/// Implementations never return raw network errors; failures collapse into
/// fallback payloads (`request_insights`) or `None` (`request_ocr_extraction`).
#[async_trait]
pub trait InsightClient: Send + Sync {
    /// Generate an insight report from the reading log and profile context
    async fn request_insights(&self, readings: &[Reading], profile: &Profile) -> Insight;

    /// Extract systolic/diastolic/pulse values from a base64-encoded photo
    /// of a blood pressure monitor screen
    async fn request_ocr_extraction(&self, image_base64: &str) -> Option<OcrReading>;
}

/// Canned client for tests: returns a fixed insight and a fixed extraction.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Default)]
pub struct MockInsightClient;

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl InsightClient for MockInsightClient {
    async fn request_insights(&self, readings: &[Reading], _profile: &Profile) -> Insight {
        use crate::models::Trend;
        Insight {
            summary: format!("Mock summary over {} readings", readings.len()),
            recommendations: vec!["Mock recommendation".to_string()],
            trend: Trend::Stable,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    async fn request_ocr_extraction(&self, _image_base64: &str) -> Option<OcrReading> {
        Some(OcrReading { systolic: 120, diastolic: 80, pulse: 72 })
    }
}
