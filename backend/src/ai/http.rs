use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;

use super::{AiError, AnalysisService, AudioAnalysis, TextAnalysis};
use crate::models::mood::Mood;
use crate::models::profile::AiTone;

/// Client for the analysis backend (`/analyze-text`, `/analyze-audio`).
#[derive(Clone)]
pub struct HttpAnalysisService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, endpoint: &str, body: serde_json::Value) -> Result<AnalysisPayload, AiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "Calling analysis service");

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status { status, body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| AiError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    mood: Option<Mood>,
    response: Option<String>,
    summary: Option<String>,
    highlights: Option<Vec<String>>,
    transcription: Option<String>,
    happiness_score: Option<f64>,
    error: Option<String>,
}

impl AnalysisPayload {
    fn into_analysis(self) -> Result<(TextAnalysis, Option<String>), AiError> {
        if let Some(error) = self.error {
            return Err(AiError::Reported(error));
        }
        let mood = self
            .mood
            .ok_or_else(|| AiError::Malformed("missing mood".into()))?;

        let analysis = TextAnalysis {
            mood,
            response: self.response.unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            highlights: self.highlights.unwrap_or_default(),
            happiness_score: self.happiness_score.map(|s| s.clamp(0.0, 10.0)),
        };
        Ok((analysis, self.transcription))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze_text(&self, text: &str, tone: AiTone) -> Result<TextAnalysis, AiError> {
        let payload = self
            .post(
                "/analyze-text",
                serde_json::json!({ "text": text, "tone": tone.as_str() }),
            )
            .await?;
        let (analysis, _) = payload.into_analysis()?;
        Ok(analysis)
    }

    async fn analyze_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
        tone: AiTone,
    ) -> Result<AudioAnalysis, AiError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(audio);
        let payload = self
            .post(
                "/analyze-audio",
                serde_json::json!({
                    "audio": encoded,
                    "mimeType": mime_type,
                    "tone": tone.as_str(),
                }),
            )
            .await?;
        let (analysis, transcription) = payload.into_analysis()?;
        let transcription = transcription
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AiError::Malformed("missing transcription".into()))?;

        Ok(AudioAnalysis {
            transcription,
            analysis,
        })
    }
}
