use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::mood::MoodSummary;

/// Once-per-(user, month, year) summary. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MonthlyRewind {
    pub id: Uuid,
    pub user_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub total_entries: i32,
    pub mood_summary: Json<MoodSummary>,
    pub average_happiness_index: Option<f64>,
    pub wellness_report: String,
    pub key_insights: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMonthlyRewind {
    pub user_id: Uuid,
    pub month: i32,
    pub year: i32,
    pub total_entries: i32,
    pub mood_summary: MoodSummary,
    pub average_happiness_index: Option<f64>,
    pub wellness_report: String,
    pub key_insights: Vec<String>,
}
