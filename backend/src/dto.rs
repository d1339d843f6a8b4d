//! Request and response shapes for the HTTP surface.
//!
//! - `*Request` / `*Query` are deserialized from the client
//! - `*Response` are serialized back
//! - Field checks use `validator` derives; cross-field checks live in handlers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::entry::JournalEntry;
use crate::models::profile::AiTone;
use crate::models::prompt::DailyPrompt;
use crate::models::rewind::MonthlyRewind;
use crate::models::wellness::WellnessUpdate;
use crate::services::aggregate::PeriodSummary;

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

/// `today` overrides the server's UTC date with the viewer's local date.
#[derive(Debug, Default, Deserialize)]
pub struct TodayQuery {
    pub today: Option<NaiveDate>,
}

// ============================================================================
// Entries
// ============================================================================

/// POST /api/entries. Exactly one of `content` or `audio` (base64).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[validate(length(min = 1, max = 20000, message = "Content must be 1-20000 characters"))]
    pub content: Option<String>,

    pub audio: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub entry: JournalEntry,
    pub used_fallback: bool,
}

/// GET /api/entries
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListEntriesQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    #[validate(range(min = 1, max = 500, message = "Limit must be 1-500"))]
    pub limit: Option<i64>,
}

// ============================================================================
// Analytics
// ============================================================================

/// GET /api/analytics/summary. Either a `year`+`month` or a `since`/`until` window.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SummaryQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12, message = "Month must be 1-12"))]
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: PeriodSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

/// GET /api/analytics/happiness
#[derive(Debug, Default, Deserialize, Validate)]
pub struct HappinessQuery {
    #[validate(range(min = 1, max = 366, message = "Days must be 1-366"))]
    pub days: Option<i64>,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HappinessResponse {
    pub happiness_index: f64,
    /// The index is the display midpoint, not a measured value.
    pub is_fallback: bool,
    pub days: i64,
}

// ============================================================================
// Rewinds
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PendingRewindResponse {
    pub rewind: Option<MonthlyRewind>,
}

// ============================================================================
// Profile & preferences
// ============================================================================

/// PUT /api/profile. `email` defaults to the one in the access token.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub date_of_birth: NaiveDate,

    #[validate(length(max = 64))]
    pub timezone: Option<String>,

    /// Viewer's local date, used to reject future birthdays.
    pub today: Option<NaiveDate>,
}

/// PUT /api/preferences
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub ai_tone: AiTone,
}

// ============================================================================
// Prompts
// ============================================================================

/// GET /api/prompts
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListPromptsQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RandomPromptResponse {
    pub prompt: Option<DailyPrompt>,
}

// ============================================================================
// Wellness
// ============================================================================

/// PUT /api/wellness. Omitted fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WellnessRequest {
    /// Defaults to `today`.
    pub date: Option<NaiveDate>,
    pub today: Option<NaiveDate>,

    #[validate(range(min = 0, max = 1440))]
    pub meditation_minutes: Option<i32>,
    #[validate(range(min = 0, max = 1440))]
    pub exercise_minutes: Option<i32>,
    #[validate(range(min = 0, max = 1440))]
    pub social_time_minutes: Option<i32>,
    #[validate(range(min = 0, max = 1440))]
    pub outdoor_time_minutes: Option<i32>,
    #[validate(range(min = 0, max = 1440))]
    pub screen_time_minutes: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub water_intake_glasses: Option<i32>,
    #[validate(range(min = 0.0, max = 24.0, message = "Sleep must be 0-24 hours"))]
    pub sleep_hours: Option<f64>,
    #[validate(range(min = 0, max = 100))]
    pub gratitude_count: Option<i32>,

    #[validate(length(max = 50))]
    pub stress_triggers: Option<Vec<String>>,
    #[validate(length(max = 50))]
    pub coping_strategies_used: Option<Vec<String>>,
    #[validate(length(max = 50))]
    pub achievements: Option<Vec<String>>,
}

impl WellnessRequest {
    pub fn into_update(self) -> WellnessUpdate {
        WellnessUpdate {
            meditation_minutes: self.meditation_minutes,
            exercise_minutes: self.exercise_minutes,
            social_time_minutes: self.social_time_minutes,
            outdoor_time_minutes: self.outdoor_time_minutes,
            screen_time_minutes: self.screen_time_minutes,
            water_intake_glasses: self.water_intake_glasses,
            sleep_hours: self.sleep_hours,
            gratitude_count: self.gratitude_count,
            stress_triggers: self.stress_triggers,
            coping_strategies_used: self.coping_strategies_used,
            achievements: self.achievements,
        }
    }
}

/// GET /api/wellness. Inclusive dates.
#[derive(Debug, Default, Deserialize)]
pub struct WellnessQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
