use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::mood::{Mood, MoodSummary};

/// Per-user, per-day rollup of journal entries. Derived, never authored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MoodAnalyticsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub dominant_mood: Option<Mood>,
    pub happiness_index: Option<f64>,
    pub entry_count: i32,
    pub mood_distribution: Json<MoodSummary>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyMoodAnalytics {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub dominant_mood: Option<Mood>,
    pub happiness_index: Option<f64>,
    pub entry_count: i32,
    pub mood_distribution: MoodSummary,
}

#[derive(Debug, Deserialize)]
pub struct MoodAnalyticsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
