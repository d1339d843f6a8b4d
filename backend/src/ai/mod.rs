//! Mood analysis collaborator.
//!
//! The analysis service is a black box returning a mood label, a reply, a
//! summary and highlights. It may also report a soft failure through an
//! `error` field in an otherwise successful response.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::mood::Mood;
use crate::models::profile::AiTone;

pub mod fallback;
pub mod http;

pub use http::HttpAnalysisService;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("analysis service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("analysis service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed analysis payload: {0}")]
    Malformed(String),

    #[error("analysis service reported: {0}")]
    Reported(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextAnalysis {
    pub mood: Mood,
    pub response: String,
    pub summary: String,
    pub highlights: Vec<String>,
    /// 0-10 when the service scores the entry.
    pub happiness_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AudioAnalysis {
    pub transcription: String,
    #[serde(flatten)]
    pub analysis: TextAnalysis,
}

#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze_text(&self, text: &str, tone: AiTone) -> Result<TextAnalysis, AiError>;

    async fn analyze_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
        tone: AiTone,
    ) -> Result<AudioAnalysis, AiError>;
}
