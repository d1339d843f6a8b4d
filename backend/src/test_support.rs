// Fixtures shared by unit tests across modules.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::ai::{AiError, AnalysisService, AudioAnalysis, TextAnalysis};
use crate::models::entry::{EntryType, JournalEntry};
use crate::models::mood::Mood;
use crate::models::profile::{AiTone, Profile};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn entry(user_id: Uuid, mood: Mood, score: Option<f64>, created_at: DateTime<Utc>) -> JournalEntry {
    JournalEntry {
        id: Uuid::new_v4(),
        user_id,
        content: "Had a long walk and thought about the week".into(),
        mood,
        happiness_score: score,
        ai_response: Some("Thanks for sharing.".into()),
        summary: Some("A walk".into()),
        highlights: vec!["A walk".into()],
        word_count: 9,
        entry_type: EntryType::Text,
        transcription: None,
        created_at,
    }
}

pub fn with_words(mut e: JournalEntry, word_count: i32) -> JournalEntry {
    e.word_count = word_count;
    e
}

pub fn profile(user_id: Uuid, full_name: &str, date_of_birth: NaiveDate) -> Profile {
    Profile {
        id: user_id,
        full_name: full_name.into(),
        email: "writer@example.com".into(),
        date_of_birth,
        timezone: None,
        created_at: at(2024, 1, 1, 0, 0, 0),
    }
}

/// Analysis service returning a canned answer, or failing on demand.
pub struct ScriptedAnalysis {
    pub mood: Mood,
    pub happiness_score: Option<f64>,
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
}

impl ScriptedAnalysis {
    pub fn answering(mood: Mood, happiness_score: Option<f64>) -> Self {
        Self {
            mood,
            happiness_score,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            mood: Mood::Neutral,
            happiness_score: None,
            fail_with: Some(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn answer(&self, tone: AiTone) -> Result<TextAnalysis, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.fail_with {
            return Err(AiError::Reported(reason.clone()));
        }
        Ok(TextAnalysis {
            mood: self.mood,
            response: format!("A {} reply", tone.as_str()),
            summary: "summary".into(),
            highlights: vec!["highlight".into()],
            happiness_score: self.happiness_score,
        })
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysis {
    async fn analyze_text(&self, _text: &str, tone: AiTone) -> Result<TextAnalysis, AiError> {
        self.answer(tone)
    }

    async fn analyze_audio(
        &self,
        _audio: &[u8],
        _mime_type: &str,
        tone: AiTone,
    ) -> Result<AudioAnalysis, AiError> {
        let analysis = self.answer(tone)?;
        Ok(AudioAnalysis {
            transcription: "spoken words about a quiet morning".into(),
            analysis,
        })
    }
}
