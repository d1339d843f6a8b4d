use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Writing prompt offered on the journal page. Only active prompts are served.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DailyPrompt {
    pub id: Uuid,
    pub prompt_text: String,
    pub category: Option<String>,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}
