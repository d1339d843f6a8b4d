//! Monthly rewind: a once-per-(user, month, year) summary, created lazily on
//! first request and returned unchanged afterwards.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::aggregate::{average_happiness, month_bounds, round2};
use super::heuristics;
use crate::error::{AppError, AppResult};
use crate::models::entry::{EntryQuery, JournalEntry};
use crate::models::mood::MoodSummary;
use crate::models::rewind::{MonthlyRewind, NewMonthlyRewind};
use crate::store::{EntryStore, RewindStore, StoreError};

/// Derive the rewind for one month's entries. Pure.
pub fn build_rewind(user_id: Uuid, month: i32, year: i32, entries: &[JournalEntry]) -> NewMonthlyRewind {
    let mood_summary = MoodSummary::from_moods(entries.iter().map(|e| e.mood));
    NewMonthlyRewind {
        user_id,
        month,
        year,
        total_entries: entries.len() as i32,
        mood_summary,
        average_happiness_index: average_happiness(entries).map(round2),
        wellness_report: heuristics::wellness_report(&mood_summary),
        key_insights: heuristics::key_insights(entries),
    }
}

/// `(month, year)` of the month before `today`.
pub fn previous_month(today: NaiveDate) -> (u32, i32) {
    if today.month() == 1 {
        (12, today.year() - 1)
    } else {
        (today.month() - 1, today.year())
    }
}

#[derive(Clone)]
pub struct RewindGenerator {
    entries: Arc<dyn EntryStore>,
    rewinds: Arc<dyn RewindStore>,
}

impl RewindGenerator {
    pub fn new(entries: Arc<dyn EntryStore>, rewinds: Arc<dyn RewindStore>) -> Self {
        Self { entries, rewinds }
    }

    pub async fn find(&self, user_id: Uuid, month: u32, year: i32) -> AppResult<Option<MonthlyRewind>> {
        Ok(self.rewinds.find_rewind(user_id, month as i32, year).await?)
    }

    /// Return the stored rewind for the key, generating and inserting it if
    /// absent. A concurrent caller winning the insert is not an error: the
    /// winner's row is re-read and returned.
    pub async fn get_or_generate(&self, user_id: Uuid, month: u32, year: i32) -> AppResult<MonthlyRewind> {
        let (start, end) = month_bounds(year, month)
            .ok_or_else(|| AppError::Validation(format!("Invalid month {month}/{year}")))?;
        let key_month = month as i32;

        if let Some(existing) = self.rewinds.find_rewind(user_id, key_month, year).await? {
            tracing::debug!(%user_id, month, year, "Monthly rewind already exists");
            return Ok(existing);
        }

        let entries = self
            .entries
            .list_entries(user_id, &EntryQuery::between(start, end))
            .await?;
        let rewind = build_rewind(user_id, key_month, year, &entries);

        match self.rewinds.insert_rewind(rewind).await {
            Ok(created) => {
                tracing::info!(
                    %user_id,
                    month,
                    year,
                    total_entries = created.total_entries,
                    "Monthly rewind created"
                );
                Ok(created)
            }
            Err(StoreError::Conflict(constraint)) => {
                tracing::warn!(%user_id, month, year, %constraint, "Monthly rewind created concurrently, re-reading");
                self.rewinds
                    .find_rewind(user_id, key_month, year)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "monthly rewind {month}/{year} missing after insert conflict"
                        ))
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The previous month's rewind, offered only during the first
    /// `window_days` days of the month and only when it has entries.
    pub async fn pending(&self, user_id: Uuid, today: NaiveDate, window_days: u32) -> AppResult<Option<MonthlyRewind>> {
        if today.day() > window_days {
            return Ok(None);
        }
        let (month, year) = previous_month(today);
        let rewind = self.get_or_generate(user_id, month, year).await?;
        Ok((rewind.total_entries > 0).then_some(rewind))
    }
}
