//! Row-store seam.
//!
//! Every table the journal core touches is reached through one of these
//! traits so services can run against Postgres in production and against
//! [`memory::InMemoryStore`] in tests. Unique-key violations surface as
//! [`StoreError::Conflict`]; callers that create derived rows rely on that to
//! reconcile concurrent inserts.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::analytics::{DailyMoodAnalytics, MoodAnalyticsRow};
use crate::models::celebration::{BirthdayCelebration, NewBirthdayCelebration};
use crate::models::entry::{EntryQuery, JournalEntry, NewJournalEntry};
use crate::models::interaction::NewAiInteraction;
use crate::models::profile::{NewProfile, Profile, UserPreferences};
use crate::models::prompt::DailyPrompt;
use crate::models::rewind::{MonthlyRewind, NewMonthlyRewind};
use crate::models::wellness::{WellnessMetrics, WellnessUpdate};

pub mod memory;
pub mod postgres;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Derives a day's analytics row from that day's entries; `None` for an empty day.
pub type DailyRollup = fn(Uuid, NaiveDate, &[JournalEntry]) -> Option<DailyMoodAnalytics>;

#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn insert_entry(&self, entry: NewJournalEntry) -> StoreResult<JournalEntry>;

    async fn get_entry(&self, user_id: Uuid, entry_id: Uuid) -> StoreResult<Option<JournalEntry>>;

    /// Newest first.
    async fn list_entries(&self, user_id: Uuid, query: &EntryQuery) -> StoreResult<Vec<JournalEntry>>;

    /// Returns the removed row, or `None` if it did not exist.
    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> StoreResult<Option<JournalEntry>>;

    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Recompute the `(user_id, date)` row from the user's entries in `day`
    /// and store it, or remove it when `rollup` yields `None`. Refreshes of
    /// the same key are serialized and each reads the entries only after it
    /// holds the key, so the last write always reflects the latest entries.
    async fn refresh_daily(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        day: &EntryQuery,
        rollup: DailyRollup,
    ) -> StoreResult<Option<MoodAnalyticsRow>>;

    /// Inclusive date bounds, newest first.
    async fn list_analytics(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<MoodAnalyticsRow>>;
}

#[async_trait]
pub trait RewindStore: Send + Sync {
    async fn find_rewind(&self, user_id: Uuid, month: i32, year: i32) -> StoreResult<Option<MonthlyRewind>>;

    /// Fails with [`StoreError::Conflict`] if a row for `(user_id, month, year)` exists.
    async fn insert_rewind(&self, rewind: NewMonthlyRewind) -> StoreResult<MonthlyRewind>;
}

#[async_trait]
pub trait CelebrationStore: Send + Sync {
    async fn find_celebration(&self, user_id: Uuid, year: i32) -> StoreResult<Option<BirthdayCelebration>>;

    /// Fails with [`StoreError::Conflict`] if a row for `(user_id, celebration_year)` exists.
    async fn insert_celebration(&self, celebration: NewBirthdayCelebration) -> StoreResult<BirthdayCelebration>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> StoreResult<Option<Profile>>;

    async fn upsert_profile(&self, profile: NewProfile) -> StoreResult<Profile>;

    async fn get_preferences(&self, user_id: Uuid) -> StoreResult<Option<UserPreferences>>;

    async fn upsert_preferences(&self, preferences: UserPreferences) -> StoreResult<UserPreferences>;
}

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Active prompts, least used first.
    async fn list_prompts(&self, limit: i64) -> StoreResult<Vec<DailyPrompt>>;

    async fn record_prompt_use(&self, prompt_id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait WellnessStore: Send + Sync {
    /// Merge `update` into the `(user_id, date)` row, creating it if absent.
    async fn upsert_wellness(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        update: WellnessUpdate,
    ) -> StoreResult<WellnessMetrics>;

    /// Inclusive date bounds, newest first.
    async fn list_wellness(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<WellnessMetrics>>;
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn log_interaction(&self, interaction: NewAiInteraction) -> StoreResult<()>;
}

/// Everything the journal core needs from one backing store.
pub trait JournalStore:
    EntryStore
    + AnalyticsStore
    + RewindStore
    + CelebrationStore
    + ProfileStore
    + InteractionStore
    + PromptStore
    + WellnessStore
{
}

impl<T> JournalStore for T where
    T: EntryStore
        + AnalyticsStore
        + RewindStore
        + CelebrationStore
        + ProfileStore
        + InteractionStore
        + PromptStore
        + WellnessStore
{
}
