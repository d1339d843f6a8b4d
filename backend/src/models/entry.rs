use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::mood::Mood;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub mood: Mood,
    /// 0-10 scale; absent when the analysis did not score the entry.
    pub happiness_score: Option<f64>,
    pub ai_response: Option<String>,
    pub summary: Option<String>,
    pub highlights: Vec<String>,
    pub word_count: i32,
    pub entry_type: EntryType,
    pub transcription: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "entry_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Text,
    Audio,
}

/// Row to insert. Ids are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: Uuid,
    pub content: String,
    pub mood: Mood,
    pub happiness_score: Option<f64>,
    pub ai_response: Option<String>,
    pub summary: Option<String>,
    pub highlights: Vec<String>,
    pub word_count: i32,
    pub entry_type: EntryType,
    pub transcription: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Filter for listing a user's entries. `since` is inclusive, `until` exclusive.
/// Results are always ordered newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl EntryQuery {
    pub fn between(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            until: Some(until),
            limit: None,
        }
    }

    pub fn matches(&self, created_at: DateTime<Utc>) -> bool {
        self.since.map_or(true, |since| created_at >= since)
            && self.until.map_or(true, |until| created_at < until)
    }
}

/// Whitespace-separated token count, as stored in `word_count`.
pub fn count_words(content: &str) -> i32 {
    content.split_whitespace().count() as i32
}
