use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::models::{Insight, OcrReading, Profile, Reading, Trend};

use super::InsightClient;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.0-flash";

/// At most this many of the most recent readings are sent with an insight request
const MAX_PROMPT_READINGS: usize = 15;

/// Client for the hosted Gemini API.
///
/// The API key is taken from the user profile when set, otherwise from the
/// key the client was constructed with (`GEMINI_API_KEY` in the binary).
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a new client with an optional default API key
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Create a client reading its default key from the `GEMINI_API_KEY` env var
    pub fn from_env() -> Self {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    fn resolve_key<'a>(&'a self, profile: &'a Profile) -> Option<&'a str> {
        profile
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .or(self.api_key.as_deref())
    }

    fn endpoint(&self, key: &str) -> String {
        format!("{}/{}:generateContent?key={}", API_BASE, MODEL, key)
    }

    async fn call(&self, key: &str, body: serde_json::Value) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.endpoint(key))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow::anyhow!("empty model response"))?;
        Ok(text)
    }
}

/// Build the insight prompt from the most recent readings and profile context
pub(crate) fn build_insight_prompt(readings: &[Reading], profile: &Profile) -> String {
    let log_data = readings
        .iter()
        .take(MAX_PROMPT_READINGS)
        .map(|r| {
            format!(
                "Date: {}, Sys: {}, Dia: {}, Pulse: {}",
                r.timestamp, r.systolic, r.diastolic, r.pulse
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let conditions = if profile.conditions.is_empty() {
        "None"
    } else {
        &profile.conditions
    };

    format!(
        "User Profile: {} year old {}, Weight: {}kg. Medical history: {}\n\n\
         Analyze the following blood pressure logs for this user. Provide a summary \
         of their health status, actionable health recommendations, and a trend status.\n\n\
         Logs:\n{}\n\n\
         IMPORTANT: You are an AI, not a doctor. Always include a medical disclaimer.",
        profile.age, profile.gender, profile.weight, conditions, log_data
    )
}

/// Fixed payload returned when there is no data to analyze
pub fn insufficient_data_insight() -> Insight {
    Insight {
        summary: "No logs available yet. Start tracking your blood pressure to receive personalized insights.".to_string(),
        recommendations: vec![
            "Log your BP twice daily.".to_string(),
            "Keep your readings consistent.".to_string(),
        ],
        trend: Trend::Insufficient,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Fixed payload returned when the service call fails
pub fn fallback_insight() -> Insight {
    Insight {
        summary: "We couldn't generate insights right now. Please check your data or try again later.".to_string(),
        recommendations: vec![
            "Consult with a medical professional regarding your readings.".to_string(),
        ],
        trend: Trend::Stable,
        generated_at: Utc::now().to_rfc3339(),
    }
}

#[async_trait]
impl InsightClient for GeminiClient {
    async fn request_insights(&self, readings: &[Reading], profile: &Profile) -> Insight {
        if readings.is_empty() {
            return insufficient_data_insight();
        }

        let Some(key) = self.resolve_key(profile) else {
            warn!("No API key configured for insight generation");
            return fallback_insight();
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": build_insight_prompt(readings, profile) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "summary": { "type": "STRING" },
                        "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "trend": { "type": "STRING", "enum": ["improving", "declining", "stable", "insufficient"] }
                    },
                    "required": ["summary", "recommendations", "trend"]
                }
            }
        });

        let key = key.to_string();
        match self.call(&key, body).await {
            Ok(text) => match serde_json::from_str::<InsightPayload>(&text) {
                Ok(payload) => Insight {
                    summary: payload.summary,
                    recommendations: payload.recommendations,
                    trend: payload.trend,
                    generated_at: Utc::now().to_rfc3339(),
                },
                Err(e) => {
                    error!("Failed to parse insight payload: {}", e);
                    fallback_insight()
                }
            },
            Err(e) => {
                error!("Insight request failed: {}", e);
                fallback_insight()
            }
        }
    }

    async fn request_ocr_extraction(&self, image_base64: &str) -> Option<OcrReading> {
        let key = self.api_key.as_deref()?;

        // Strip a data-URL prefix if the client sent one
        let data = image_base64
            .split_once(',')
            .map(|(_, rest)| rest)
            .unwrap_or(image_base64);

        let body = json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": data } },
                    { "text": "Extract the blood pressure readings (systolic, diastolic) and pulse rate from this blood pressure monitor screen. Return ONLY a JSON object." }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "systolic": { "type": "NUMBER" },
                        "diastolic": { "type": "NUMBER" },
                        "pulse": { "type": "NUMBER" }
                    },
                    "required": ["systolic", "diastolic", "pulse"]
                }
            }
        });

        match self.call(key, body).await {
            Ok(text) => match serde_json::from_str::<OcrReading>(&text) {
                Ok(values) => Some(values),
                Err(e) => {
                    error!("Failed to parse OCR payload: {}", e);
                    None
                }
            },
            Err(e) => {
                error!("OCR request failed: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct InsightPayload {
    summary: String,
    recommendations: Vec<String>,
    trend: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(n: usize) -> Reading {
        Reading {
            id: format!("r-{}", n),
            systolic: 120,
            diastolic: 80,
            pulse: 70,
            timestamp: format!("2024-01-{:02}T08:00:00Z", n + 1),
            note: None,
        }
    }

    #[test]
    fn prompt_includes_profile_context_and_logs() {
        let mut profile = Profile::default();
        profile.age = "45".to_string();
        profile.conditions = "diabetes".to_string();
        let readings = vec![reading(0), reading(1)];

        let prompt = build_insight_prompt(&readings, &profile);
        assert!(prompt.contains("45 year old Other"));
        assert!(prompt.contains("Medical history: diabetes"));
        assert!(prompt.contains("Sys: 120, Dia: 80, Pulse: 70"));
        assert!(prompt.contains("medical disclaimer"));
    }

    #[test]
    fn prompt_is_capped_at_fifteen_readings() {
        let readings: Vec<Reading> = (0..20).map(reading).collect();
        let prompt = build_insight_prompt(&readings, &Profile::default());
        assert_eq!(prompt.matches("Sys:").count(), MAX_PROMPT_READINGS);
    }

    #[test]
    fn empty_conditions_read_as_none() {
        let prompt = build_insight_prompt(&[reading(0)], &Profile::default());
        assert!(prompt.contains("Medical history: None"));
    }

    #[tokio::test]
    async fn empty_readings_short_circuit_to_insufficient() {
        let client = GeminiClient::new(Some("test-key".to_string()));
        let insight = client.request_insights(&[], &Profile::default()).await;
        assert_eq!(insight.trend, Trend::Insufficient);
    }

    #[tokio::test]
    async fn missing_key_yields_fallback_without_network() {
        let client = GeminiClient::new(None);
        let insight = client.request_insights(&[reading(0)], &Profile::default()).await;
        assert_eq!(insight.trend, Trend::Stable);
        assert!(insight.summary.contains("couldn't generate insights"));
    }

    #[tokio::test]
    async fn ocr_without_key_returns_none() {
        let client = GeminiClient::new(None);
        assert!(client.request_ocr_extraction("abc123").await.is_none());
    }

    #[test]
    fn profile_key_overrides_client_key() {
        let client = GeminiClient::new(Some("default".to_string()));
        let mut profile = Profile::default();
        profile.api_key = Some("user-key".to_string());
        assert_eq!(client.resolve_key(&profile), Some("user-key"));

        profile.api_key = Some(String::new());
        assert_eq!(client.resolve_key(&profile), Some("default"));
    }
}
