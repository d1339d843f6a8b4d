use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create-or-replace payload keyed on the auth provider's user id.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub ai_tone: AiTone,
}

/// Voice the analysis service answers in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "ai_tone", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiTone {
    #[default]
    Calm,
    Cheerful,
    Thoughtful,
}

impl AiTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiTone::Calm => "calm",
            AiTone::Cheerful => "cheerful",
            AiTone::Thoughtful => "thoughtful",
        }
    }
}
