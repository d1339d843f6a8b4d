use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Self-reported habits for one user and day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct WellnessMetrics {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub meditation_minutes: i32,
    pub exercise_minutes: i32,
    pub social_time_minutes: i32,
    pub outdoor_time_minutes: i32,
    pub screen_time_minutes: i32,
    pub water_intake_glasses: i32,
    pub sleep_hours: f64,
    pub gratitude_count: i32,
    pub stress_triggers: Vec<String>,
    pub coping_strategies_used: Vec<String>,
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update: `None` keeps the stored value (or the zero default on first write).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WellnessUpdate {
    pub meditation_minutes: Option<i32>,
    pub exercise_minutes: Option<i32>,
    pub social_time_minutes: Option<i32>,
    pub outdoor_time_minutes: Option<i32>,
    pub screen_time_minutes: Option<i32>,
    pub water_intake_glasses: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub gratitude_count: Option<i32>,
    pub stress_triggers: Option<Vec<String>>,
    pub coping_strategies_used: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
}

impl WellnessMetrics {
    pub fn empty(user_id: Uuid, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            meditation_minutes: 0,
            exercise_minutes: 0,
            social_time_minutes: 0,
            outdoor_time_minutes: 0,
            screen_time_minutes: 0,
            water_intake_glasses: 0,
            sleep_hours: 0.0,
            gratitude_count: 0,
            stress_triggers: Vec::new(),
            coping_strategies_used: Vec::new(),
            achievements: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Overlay the fields present in `update`.
    pub fn apply(&mut self, update: WellnessUpdate) {
        if let Some(v) = update.meditation_minutes {
            self.meditation_minutes = v;
        }
        if let Some(v) = update.exercise_minutes {
            self.exercise_minutes = v;
        }
        if let Some(v) = update.social_time_minutes {
            self.social_time_minutes = v;
        }
        if let Some(v) = update.outdoor_time_minutes {
            self.outdoor_time_minutes = v;
        }
        if let Some(v) = update.screen_time_minutes {
            self.screen_time_minutes = v;
        }
        if let Some(v) = update.water_intake_glasses {
            self.water_intake_glasses = v;
        }
        if let Some(v) = update.sleep_hours {
            self.sleep_hours = v;
        }
        if let Some(v) = update.gratitude_count {
            self.gratitude_count = v;
        }
        if let Some(v) = update.stress_triggers {
            self.stress_triggers = v;
        }
        if let Some(v) = update.coping_strategies_used {
            self.coping_strategies_used = v;
        }
        if let Some(v) = update.achievements {
            self.achievements = v;
        }
    }
}
