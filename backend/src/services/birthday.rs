//! Birthday celebration: at most one row per (user, year), created on the
//! user's birthday the first time it is asked for.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use super::heuristics;
use crate::error::{AppError, AppResult};
use crate::models::analytics::MoodAnalyticsRow;
use crate::models::celebration::{BirthdayCelebration, NewBirthdayCelebration};
use crate::models::entry::{EntryQuery, JournalEntry};
use crate::models::profile::Profile;
use crate::store::{AnalyticsStore, CelebrationStore, EntryStore, ProfileStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "celebration", rename_all = "snake_case")]
pub enum CelebrationOutcome {
    NoCelebration,
    Celebration(BirthdayCelebration),
}

/// Month and day match, year ignored.
pub fn is_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    date_of_birth.month() == today.month() && date_of_birth.day() == today.day()
}

pub fn build_celebration(
    profile: &Profile,
    year: i32,
    entries: &[JournalEntry],
    analytics: &[MoodAnalyticsRow],
) -> NewBirthdayCelebration {
    NewBirthdayCelebration {
        user_id: profile.id,
        celebration_year: year,
        special_message: heuristics::birthday_message(&profile.full_name),
        achievements_summary: heuristics::achievements_summary(entries),
        year_in_review: heuristics::year_in_review(entries, year),
        mood_journey_summary: heuristics::mood_journey_summary(analytics),
    }
}

#[derive(Clone)]
pub struct BirthdayResolver {
    profiles: Arc<dyn ProfileStore>,
    entries: Arc<dyn EntryStore>,
    analytics: Arc<dyn AnalyticsStore>,
    celebrations: Arc<dyn CelebrationStore>,
}

impl BirthdayResolver {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        entries: Arc<dyn EntryStore>,
        analytics: Arc<dyn AnalyticsStore>,
        celebrations: Arc<dyn CelebrationStore>,
    ) -> Self {
        Self {
            profiles,
            entries,
            analytics,
            celebrations,
        }
    }

    /// `today` is the viewer's local calendar date.
    pub async fn resolve(&self, user_id: Uuid, today: NaiveDate) -> AppResult<CelebrationOutcome> {
        let Some(profile) = self.profiles.get_profile(user_id).await? else {
            tracing::debug!(%user_id, "No profile, skipping birthday check");
            return Ok(CelebrationOutcome::NoCelebration);
        };
        if !is_birthday(profile.date_of_birth, today) {
            return Ok(CelebrationOutcome::NoCelebration);
        }

        let year = today.year();
        if let Some(existing) = self.celebrations.find_celebration(user_id, year).await? {
            tracing::debug!(%user_id, year, "Birthday celebration already exists");
            return Ok(CelebrationOutcome::Celebration(existing));
        }

        let entries = self
            .entries
            .list_entries(user_id, &EntryQuery::default())
            .await?;
        let analytics = self.analytics.list_analytics(user_id, None, None).await?;
        let celebration = build_celebration(&profile, year, &entries, &analytics);

        let row = match self.celebrations.insert_celebration(celebration).await {
            Ok(created) => {
                tracing::info!(%user_id, year, "Birthday celebration created");
                created
            }
            Err(StoreError::Conflict(constraint)) => {
                tracing::warn!(%user_id, year, %constraint, "Birthday celebration created concurrently, re-reading");
                self.celebrations
                    .find_celebration(user_id, year)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "birthday celebration {year} missing after insert conflict"
                        ))
                    })?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(CelebrationOutcome::Celebration(row))
    }
}
