use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// At most one per (user, celebration year).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct BirthdayCelebration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub celebration_year: i32,
    pub special_message: String,
    pub achievements_summary: String,
    pub year_in_review: String,
    pub mood_journey_summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBirthdayCelebration {
    pub user_id: Uuid,
    pub celebration_year: i32,
    pub special_message: String,
    pub achievements_summary: String,
    pub year_in_review: String,
    pub mood_journey_summary: String,
}
