use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AiInteraction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_id: Option<Uuid>,
    pub interaction_type: String,
    pub input_data: Option<String>,
    pub ai_response: Option<String>,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAiInteraction {
    pub user_id: Uuid,
    pub entry_id: Option<Uuid>,
    pub interaction_type: &'static str,
    pub input_data: Option<String>,
    pub ai_response: Option<String>,
    pub model_version: String,
}
