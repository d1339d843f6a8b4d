//! Mood and happiness aggregation over entry collections and daily rollups.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::analytics::{DailyMoodAnalytics, MoodAnalyticsRow};
use crate::models::entry::{EntryQuery, JournalEntry};
use crate::models::mood::{Mood, MoodPercentages, MoodSummary};
use crate::store::{AnalyticsStore, EntryStore};

/// Display-only stand-in when no happiness data exists. Never persisted.
pub const HAPPINESS_MIDPOINT: f64 = 5.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodSummary {
    pub total_entries: u32,
    pub mood_summary: MoodSummary,
    pub percentages: MoodPercentages,
    pub dominant_mood: Option<Mood>,
    /// `None` when no entry in the period carries a score.
    pub happiness_index: Option<f64>,
}

pub fn summarize(entries: &[JournalEntry]) -> PeriodSummary {
    let mood_summary = MoodSummary::from_moods(entries.iter().map(|e| e.mood));
    PeriodSummary {
        total_entries: mood_summary.total(),
        mood_summary,
        percentages: mood_summary.percentages(),
        dominant_mood: mood_summary.dominant(),
        happiness_index: average_happiness(entries).map(round2),
    }
}

/// Mean of the non-null `happiness_score`s.
pub fn average_happiness(entries: &[JournalEntry]) -> Option<f64> {
    mean(entries.iter().filter_map(|e| e.happiness_score))
}

/// Mean of the non-null daily `happiness_index` values.
pub fn average_daily_index(rows: &[MoodAnalyticsRow]) -> Option<f64> {
    mean(rows.iter().filter_map(|r| r.happiness_index))
}

pub fn display_happiness(index: Option<f64>) -> f64 {
    index.unwrap_or(HAPPINESS_MIDPOINT)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// `[first instant of the month, first instant of the next month)` in UTC.
/// `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((midnight(first)?, midnight(next)?))
}

pub fn day_bounds(date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date.succ_opt()?;
    Some((midnight(date)?, midnight(next)?))
}

/// Rollup of one user's entries for one day; `None` when the day has no entries.
pub fn daily_rollup(user_id: Uuid, date: NaiveDate, entries: &[JournalEntry]) -> Option<DailyMoodAnalytics> {
    if entries.is_empty() {
        return None;
    }
    let summary = summarize(entries);
    Some(DailyMoodAnalytics {
        user_id,
        date,
        dominant_mood: summary.dominant_mood,
        happiness_index: summary.happiness_index,
        entry_count: summary.total_entries as i32,
        mood_distribution: summary.mood_summary,
    })
}

/// Keeps the daily analytics table in step with entries and answers
/// window queries over it.
#[derive(Clone)]
pub struct Aggregator {
    entries: Arc<dyn EntryStore>,
    analytics: Arc<dyn AnalyticsStore>,
}

impl Aggregator {
    pub fn new(entries: Arc<dyn EntryStore>, analytics: Arc<dyn AnalyticsStore>) -> Self {
        Self { entries, analytics }
    }

    /// Recompute the `(user, date)` rollup from that day's entries. A day with
    /// no entries left loses its row.
    pub async fn refresh_day(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<MoodAnalyticsRow>> {
        let (start, end) = day_bounds(date)
            .ok_or_else(|| anyhow::anyhow!("date out of range: {date}"))?;
        let row = self
            .analytics
            .refresh_daily(user_id, date, &EntryQuery::between(start, end), daily_rollup)
            .await?;

        match &row {
            Some(row) => {
                tracing::debug!(%user_id, %date, entry_count = row.entry_count, "Mood analytics refreshed")
            }
            None => tracing::debug!(%user_id, %date, "Mood analytics cleared"),
        }
        Ok(row)
    }

    pub async fn summarize_window(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> AppResult<PeriodSummary> {
        let query = EntryQuery {
            since,
            until,
            limit: None,
        };
        let entries = self.entries.list_entries(user_id, &query).await?;
        Ok(summarize(&entries))
    }

    /// Mean daily happiness index over `[today - days, today]`, rounded to two
    /// decimals. `None` when no day in the window has a score.
    pub async fn happiness_index(&self, user_id: Uuid, today: NaiveDate, days: i64) -> AppResult<Option<f64>> {
        let start = Duration::try_days(days)
            .filter(|_| days >= 0)
            .and_then(|lookback| today.checked_sub_signed(lookback))
            .ok_or_else(|| {
                AppError::Validation(format!("A {days}-day lookback from {today} is out of range"))
            })?;
        let rows = self
            .analytics
            .list_analytics(user_id, Some(start), Some(today))
            .await?;
        Ok(average_daily_index(&rows).map(round2))
    }

    pub async fn calendar(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<MoodAnalyticsRow>> {
        Ok(self.analytics.list_analytics(user_id, start, end).await?)
    }
}
