//! In-memory store.
//!
//! Enforces the same unique keys as the Postgres schema, so services can be
//! exercised without a database. `set_offline(true)` makes every call fail
//! with [`StoreError::Unavailable`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AnalyticsStore, CelebrationStore, DailyRollup, EntryStore, InteractionStore, ProfileStore,
    PromptStore, RewindStore, StoreError, StoreResult, WellnessStore,
};
use crate::models::analytics::MoodAnalyticsRow;
use crate::models::celebration::{BirthdayCelebration, NewBirthdayCelebration};
use crate::models::entry::{EntryQuery, JournalEntry, NewJournalEntry};
use crate::models::interaction::{AiInteraction, NewAiInteraction};
use crate::models::profile::{NewProfile, Profile, UserPreferences};
use crate::models::prompt::DailyPrompt;
use crate::models::rewind::{MonthlyRewind, NewMonthlyRewind};
use crate::models::wellness::{WellnessMetrics, WellnessUpdate};

#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<Vec<JournalEntry>>,
    analytics: RwLock<HashMap<(Uuid, NaiveDate), MoodAnalyticsRow>>,
    rewinds: RwLock<HashMap<(Uuid, i32, i32), MonthlyRewind>>,
    celebrations: RwLock<HashMap<(Uuid, i32), BirthdayCelebration>>,
    profiles: RwLock<HashMap<Uuid, Profile>>,
    preferences: RwLock<HashMap<Uuid, UserPreferences>>,
    interactions: RwLock<Vec<AiInteraction>>,
    prompts: RwLock<Vec<(DailyPrompt, bool)>>,
    wellness: RwLock<HashMap<(Uuid, NaiveDate), WellnessMetrics>>,
    offline: AtomicBool,
    rollup_delay_ms: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn put_profile(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    pub async fn put_preferences(&self, preferences: UserPreferences) {
        self.preferences
            .write()
            .await
            .insert(preferences.user_id, preferences);
    }

    /// Adds a prompt; inactive prompts are stored but never listed.
    pub async fn put_prompt(&self, prompt_text: &str, active: bool) -> DailyPrompt {
        let prompt = DailyPrompt {
            id: Uuid::new_v4(),
            prompt_text: prompt_text.to_string(),
            category: None,
            usage_count: 0,
            created_at: Utc::now(),
        };
        self.prompts.write().await.push((prompt.clone(), active));
        prompt
    }

    /// Stall the next daily refresh between reading entries and writing the
    /// row, with the key held.
    pub fn delay_next_rollup(&self, delay: Duration) {
        self.rollup_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn rewind_count(&self) -> usize {
        self.rewinds.read().await.len()
    }

    pub async fn celebration_count(&self) -> usize {
        self.celebrations.read().await.len()
    }

    pub async fn interactions(&self) -> Vec<AiInteraction> {
        self.interactions.read().await.clone()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for InMemoryStore {
    async fn insert_entry(&self, entry: NewJournalEntry) -> StoreResult<JournalEntry> {
        self.check_online()?;
        let row = JournalEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            content: entry.content,
            mood: entry.mood,
            happiness_score: entry.happiness_score,
            ai_response: entry.ai_response,
            summary: entry.summary,
            highlights: entry.highlights,
            word_count: entry.word_count,
            entry_type: entry.entry_type,
            transcription: entry.transcription,
            created_at: entry.created_at,
        };
        self.entries.write().await.push(row.clone());
        Ok(row)
    }

    async fn get_entry(&self, user_id: Uuid, entry_id: Uuid) -> StoreResult<Option<JournalEntry>> {
        self.check_online()?;
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|e| e.id == entry_id && e.user_id == user_id)
            .cloned())
    }

    async fn list_entries(&self, user_id: Uuid, query: &EntryQuery) -> StoreResult<Vec<JournalEntry>> {
        self.check_online()?;
        let mut items: Vec<JournalEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && query.matches(e.created_at))
            .cloned()
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            items.truncate(limit.max(0) as usize);
        }
        Ok(items)
    }

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> StoreResult<Option<JournalEntry>> {
        self.check_online()?;
        let mut guard = self.entries.write().await;
        let position = guard
            .iter()
            .position(|e| e.id == entry_id && e.user_id == user_id);
        Ok(position.map(|idx| guard.remove(idx)))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_online()
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryStore {
    async fn refresh_daily(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        day: &EntryQuery,
        rollup: DailyRollup,
    ) -> StoreResult<Option<MoodAnalyticsRow>> {
        self.check_online()?;
        // The analytics lock is the per-key guard: entries are read only after it is held.
        let mut guard = self.analytics.write().await;
        let entries: Vec<JournalEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && day.matches(e.created_at))
            .cloned()
            .collect();

        let delay = self.rollup_delay_ms.swap(0, Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let Some(row) = rollup(user_id, date, &entries) else {
            guard.remove(&(user_id, date));
            return Ok(None);
        };
        let id = guard
            .get(&(user_id, date))
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);
        let stored = MoodAnalyticsRow {
            id,
            user_id: row.user_id,
            date: row.date,
            dominant_mood: row.dominant_mood,
            happiness_index: row.happiness_index,
            entry_count: row.entry_count,
            mood_distribution: Json(row.mood_distribution),
            updated_at: Utc::now(),
        };
        guard.insert((user_id, date), stored.clone());
        Ok(Some(stored))
    }

    async fn list_analytics(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<MoodAnalyticsRow>> {
        self.check_online()?;
        let mut rows: Vec<MoodAnalyticsRow> = self
            .analytics
            .read()
            .await
            .values()
            .filter(|r| {
                r.user_id == user_id
                    && start.map_or(true, |s| r.date >= s)
                    && end.map_or(true, |e| r.date <= e)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

#[async_trait]
impl RewindStore for InMemoryStore {
    async fn find_rewind(&self, user_id: Uuid, month: i32, year: i32) -> StoreResult<Option<MonthlyRewind>> {
        self.check_online()?;
        Ok(self.rewinds.read().await.get(&(user_id, month, year)).cloned())
    }

    async fn insert_rewind(&self, rewind: NewMonthlyRewind) -> StoreResult<MonthlyRewind> {
        self.check_online()?;
        let key = (rewind.user_id, rewind.month, rewind.year);
        let mut guard = self.rewinds.write().await;
        if guard.contains_key(&key) {
            return Err(StoreError::Conflict(
                "monthly_rewinds_user_id_month_year_key".into(),
            ));
        }
        let stored = MonthlyRewind {
            id: Uuid::new_v4(),
            user_id: rewind.user_id,
            month: rewind.month,
            year: rewind.year,
            total_entries: rewind.total_entries,
            mood_summary: Json(rewind.mood_summary),
            average_happiness_index: rewind.average_happiness_index,
            wellness_report: rewind.wellness_report,
            key_insights: rewind.key_insights,
            created_at: Utc::now(),
        };
        guard.insert(key, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl CelebrationStore for InMemoryStore {
    async fn find_celebration(&self, user_id: Uuid, year: i32) -> StoreResult<Option<BirthdayCelebration>> {
        self.check_online()?;
        Ok(self.celebrations.read().await.get(&(user_id, year)).cloned())
    }

    async fn insert_celebration(&self, celebration: NewBirthdayCelebration) -> StoreResult<BirthdayCelebration> {
        self.check_online()?;
        let key = (celebration.user_id, celebration.celebration_year);
        let mut guard = self.celebrations.write().await;
        if guard.contains_key(&key) {
            return Err(StoreError::Conflict(
                "birthday_celebrations_user_id_celebration_year_key".into(),
            ));
        }
        let stored = BirthdayCelebration {
            id: Uuid::new_v4(),
            user_id: celebration.user_id,
            celebration_year: celebration.celebration_year,
            special_message: celebration.special_message,
            achievements_summary: celebration.achievements_summary,
            year_in_review: celebration.year_in_review,
            mood_journey_summary: celebration.mood_journey_summary,
            created_at: Utc::now(),
        };
        guard.insert(key, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> StoreResult<Option<Profile>> {
        self.check_online()?;
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: NewProfile) -> StoreResult<Profile> {
        self.check_online()?;
        let mut guard = self.profiles.write().await;
        let created_at = guard
            .get(&profile.id)
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);
        let stored = Profile {
            id: profile.id,
            full_name: profile.full_name,
            email: profile.email,
            date_of_birth: profile.date_of_birth,
            timezone: profile.timezone,
            created_at,
        };
        guard.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_preferences(&self, user_id: Uuid) -> StoreResult<Option<UserPreferences>> {
        self.check_online()?;
        Ok(self.preferences.read().await.get(&user_id).cloned())
    }

    async fn upsert_preferences(&self, preferences: UserPreferences) -> StoreResult<UserPreferences> {
        self.check_online()?;
        self.preferences
            .write()
            .await
            .insert(preferences.user_id, preferences.clone());
        Ok(preferences)
    }
}

#[async_trait]
impl PromptStore for InMemoryStore {
    async fn list_prompts(&self, limit: i64) -> StoreResult<Vec<DailyPrompt>> {
        self.check_online()?;
        let mut prompts: Vec<DailyPrompt> = self
            .prompts
            .read()
            .await
            .iter()
            .filter(|(_, active)| *active)
            .map(|(prompt, _)| prompt.clone())
            .collect();
        prompts.sort_by(|a, b| {
            a.usage_count
                .cmp(&b.usage_count)
                .then(a.created_at.cmp(&b.created_at))
        });
        prompts.truncate(limit.max(0) as usize);
        Ok(prompts)
    }

    async fn record_prompt_use(&self, prompt_id: Uuid) -> StoreResult<()> {
        self.check_online()?;
        if let Some((prompt, _)) = self
            .prompts
            .write()
            .await
            .iter_mut()
            .find(|(p, _)| p.id == prompt_id)
        {
            prompt.usage_count += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl WellnessStore for InMemoryStore {
    async fn upsert_wellness(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        update: WellnessUpdate,
    ) -> StoreResult<WellnessMetrics> {
        self.check_online()?;
        let mut guard = self.wellness.write().await;
        let row = guard
            .entry((user_id, date))
            .or_insert_with(|| WellnessMetrics::empty(user_id, date));
        row.apply(update);
        Ok(row.clone())
    }

    async fn list_wellness(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<WellnessMetrics>> {
        self.check_online()?;
        let mut rows: Vec<WellnessMetrics> = self
            .wellness
            .read()
            .await
            .values()
            .filter(|r| {
                r.user_id == user_id
                    && start.map_or(true, |s| r.date >= s)
                    && end.map_or(true, |e| r.date <= e)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

#[async_trait]
impl InteractionStore for InMemoryStore {
    async fn log_interaction(&self, interaction: NewAiInteraction) -> StoreResult<()> {
        self.check_online()?;
        self.interactions.write().await.push(AiInteraction {
            id: Uuid::new_v4(),
            user_id: interaction.user_id,
            entry_id: interaction.entry_id,
            interaction_type: interaction.interaction_type.to_string(),
            input_data: interaction.input_data,
            ai_response: interaction.ai_response,
            model_version: interaction.model_version,
            created_at: Utc::now(),
        });
        Ok(())
    }
}
