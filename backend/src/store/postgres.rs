use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    AnalyticsStore, CelebrationStore, DailyRollup, EntryStore, InteractionStore, ProfileStore,
    PromptStore, RewindStore, StoreError, StoreResult, WellnessStore,
};
use crate::models::analytics::MoodAnalyticsRow;
use crate::models::celebration::{BirthdayCelebration, NewBirthdayCelebration};
use crate::models::entry::{EntryQuery, JournalEntry, NewJournalEntry};
use crate::models::interaction::NewAiInteraction;
use crate::models::profile::{NewProfile, Profile, UserPreferences};
use crate::models::prompt::DailyPrompt;
use crate::models::rewind::{MonthlyRewind, NewMonthlyRewind};
use crate::models::wellness::{WellnessMetrics, WellnessUpdate};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations become `Conflict` so callers can reconcile; anything else
/// passes through unchanged.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.kind() == sqlx::error::ErrorKind::UniqueViolation {
            return StoreError::Conflict(db.constraint().unwrap_or("unique").to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl EntryStore for PgStore {
    async fn insert_entry(&self, entry: NewJournalEntry) -> StoreResult<JournalEntry> {
        sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (
                id, user_id, content, mood, happiness_score, ai_response, summary,
                highlights, word_count, entry_type, transcription, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.content)
        .bind(entry.mood)
        .bind(entry.happiness_score)
        .bind(&entry.ai_response)
        .bind(&entry.summary)
        .bind(&entry.highlights)
        .bind(entry.word_count)
        .bind(entry.entry_type)
        .bind(&entry.transcription)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn get_entry(&self, user_id: Uuid, entry_id: Uuid) -> StoreResult<Option<JournalEntry>> {
        let entry = sqlx::query_as::<_, JournalEntry>(
            "SELECT * FROM journal_entries WHERE id = $1 AND user_id = $2",
        )
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_entries(&self, user_id: Uuid, query: &EntryQuery) -> StoreResult<Vec<JournalEntry>> {
        // LIMIT NULL means no limit in Postgres.
        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at < $3)
            ORDER BY created_at DESC
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(query.since)
        .bind(query.until)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> StoreResult<Option<JournalEntry>> {
        let entry = sqlx::query_as::<_, JournalEntry>(
            "DELETE FROM journal_entries WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AnalyticsStore for PgStore {
    async fn refresh_daily(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        day: &EntryQuery,
        rollup: DailyRollup,
    ) -> StoreResult<Option<MoodAnalyticsRow>> {
        let mut tx = self.pool.begin().await?;

        // Serializes refreshes of one (user, date); released on commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!("mood_analytics:{user_id}:{date}"))
            .execute(&mut *tx)
            .await?;

        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at < $3)
            "#,
        )
        .bind(user_id)
        .bind(day.since)
        .bind(day.until)
        .fetch_all(&mut *tx)
        .await?;

        let stored = match rollup(user_id, date, &entries) {
            Some(row) => Some(
                sqlx::query_as::<_, MoodAnalyticsRow>(
                    r#"
                    INSERT INTO mood_analytics (
                        id, user_id, date, dominant_mood, happiness_index, entry_count, mood_distribution
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ON CONFLICT (user_id, date) DO UPDATE SET
                        dominant_mood = EXCLUDED.dominant_mood,
                        happiness_index = EXCLUDED.happiness_index,
                        entry_count = EXCLUDED.entry_count,
                        mood_distribution = EXCLUDED.mood_distribution,
                        updated_at = NOW()
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(row.user_id)
                .bind(row.date)
                .bind(row.dominant_mood)
                .bind(row.happiness_index)
                .bind(row.entry_count)
                .bind(Json(row.mood_distribution))
                .fetch_one(&mut *tx)
                .await
                .map_err(classify)?,
            ),
            None => {
                sqlx::query("DELETE FROM mood_analytics WHERE user_id = $1 AND date = $2")
                    .bind(user_id)
                    .bind(date)
                    .execute(&mut *tx)
                    .await?;
                None
            }
        };

        tx.commit().await?;
        Ok(stored)
    }

    async fn list_analytics(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<MoodAnalyticsRow>> {
        let rows = sqlx::query_as::<_, MoodAnalyticsRow>(
            r#"
            SELECT * FROM mood_analytics
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl RewindStore for PgStore {
    async fn find_rewind(&self, user_id: Uuid, month: i32, year: i32) -> StoreResult<Option<MonthlyRewind>> {
        let rewind = sqlx::query_as::<_, MonthlyRewind>(
            "SELECT * FROM monthly_rewinds WHERE user_id = $1 AND month = $2 AND year = $3",
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rewind)
    }

    async fn insert_rewind(&self, rewind: NewMonthlyRewind) -> StoreResult<MonthlyRewind> {
        // Plain INSERT: the (user_id, month, year) constraint must fire on a race
        // so the caller can re-read the winner's row.
        sqlx::query_as::<_, MonthlyRewind>(
            r#"
            INSERT INTO monthly_rewinds (
                id, user_id, month, year, total_entries, mood_summary,
                average_happiness_index, wellness_report, key_insights
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rewind.user_id)
        .bind(rewind.month)
        .bind(rewind.year)
        .bind(rewind.total_entries)
        .bind(Json(rewind.mood_summary))
        .bind(rewind.average_happiness_index)
        .bind(&rewind.wellness_report)
        .bind(&rewind.key_insights)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }
}

#[async_trait]
impl CelebrationStore for PgStore {
    async fn find_celebration(&self, user_id: Uuid, year: i32) -> StoreResult<Option<BirthdayCelebration>> {
        let celebration = sqlx::query_as::<_, BirthdayCelebration>(
            r#"
            SELECT * FROM birthday_celebrations
            WHERE user_id = $1 AND celebration_year = $2
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(celebration)
    }

    async fn insert_celebration(&self, celebration: NewBirthdayCelebration) -> StoreResult<BirthdayCelebration> {
        sqlx::query_as::<_, BirthdayCelebration>(
            r#"
            INSERT INTO birthday_celebrations (
                id, user_id, celebration_year, special_message,
                achievements_summary, year_in_review, mood_journey_summary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(celebration.user_id)
        .bind(celebration.celebration_year)
        .bind(&celebration.special_message)
        .bind(&celebration.achievements_summary)
        .bind(&celebration.year_in_review)
        .bind(&celebration.mood_journey_summary)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self, user_id: Uuid) -> StoreResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, full_name, email, date_of_birth, timezone, created_at FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn upsert_profile(&self, profile: NewProfile) -> StoreResult<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, full_name, email, date_of_birth, timezone)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                date_of_birth = EXCLUDED.date_of_birth,
                timezone = EXCLUDED.timezone,
                updated_at = NOW()
            RETURNING id, full_name, email, date_of_birth, timezone, created_at
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(profile.date_of_birth)
        .bind(&profile.timezone)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn get_preferences(&self, user_id: Uuid) -> StoreResult<Option<UserPreferences>> {
        let preferences = sqlx::query_as::<_, UserPreferences>(
            "SELECT user_id, ai_tone FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preferences)
    }

    async fn upsert_preferences(&self, preferences: UserPreferences) -> StoreResult<UserPreferences> {
        sqlx::query_as::<_, UserPreferences>(
            r#"
            INSERT INTO user_preferences (user_id, ai_tone)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                ai_tone = EXCLUDED.ai_tone,
                updated_at = NOW()
            RETURNING user_id, ai_tone
            "#,
        )
        .bind(preferences.user_id)
        .bind(preferences.ai_tone)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }
}

#[async_trait]
impl PromptStore for PgStore {
    async fn list_prompts(&self, limit: i64) -> StoreResult<Vec<DailyPrompt>> {
        let prompts = sqlx::query_as::<_, DailyPrompt>(
            r#"
            SELECT id, prompt_text, category, usage_count, created_at
            FROM daily_prompts
            WHERE is_active = true
            ORDER BY usage_count ASC, created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    async fn record_prompt_use(&self, prompt_id: Uuid) -> StoreResult<()> {
        sqlx::query("UPDATE daily_prompts SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(prompt_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl WellnessStore for PgStore {
    async fn upsert_wellness(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        update: WellnessUpdate,
    ) -> StoreResult<WellnessMetrics> {
        sqlx::query_as::<_, WellnessMetrics>(
            r#"
            INSERT INTO wellness_metrics (
                id, user_id, date, meditation_minutes, exercise_minutes, social_time_minutes,
                outdoor_time_minutes, screen_time_minutes, water_intake_glasses, sleep_hours,
                gratitude_count, stress_triggers, coping_strategies_used, achievements
            )
            VALUES (
                $1, $2, $3, COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0),
                COALESCE($7, 0), COALESCE($8, 0), COALESCE($9, 0), COALESCE($10, 0),
                COALESCE($11, 0), COALESCE($12, '{}'), COALESCE($13, '{}'), COALESCE($14, '{}')
            )
            ON CONFLICT (user_id, date) DO UPDATE SET
                meditation_minutes = COALESCE($4, wellness_metrics.meditation_minutes),
                exercise_minutes = COALESCE($5, wellness_metrics.exercise_minutes),
                social_time_minutes = COALESCE($6, wellness_metrics.social_time_minutes),
                outdoor_time_minutes = COALESCE($7, wellness_metrics.outdoor_time_minutes),
                screen_time_minutes = COALESCE($8, wellness_metrics.screen_time_minutes),
                water_intake_glasses = COALESCE($9, wellness_metrics.water_intake_glasses),
                sleep_hours = COALESCE($10, wellness_metrics.sleep_hours),
                gratitude_count = COALESCE($11, wellness_metrics.gratitude_count),
                stress_triggers = COALESCE($12, wellness_metrics.stress_triggers),
                coping_strategies_used = COALESCE($13, wellness_metrics.coping_strategies_used),
                achievements = COALESCE($14, wellness_metrics.achievements)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(update.meditation_minutes)
        .bind(update.exercise_minutes)
        .bind(update.social_time_minutes)
        .bind(update.outdoor_time_minutes)
        .bind(update.screen_time_minutes)
        .bind(update.water_intake_glasses)
        .bind(update.sleep_hours)
        .bind(update.gratitude_count)
        .bind(&update.stress_triggers)
        .bind(&update.coping_strategies_used)
        .bind(&update.achievements)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn list_wellness(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<WellnessMetrics>> {
        let rows = sqlx::query_as::<_, WellnessMetrics>(
            r#"
            SELECT * FROM wellness_metrics
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl InteractionStore for PgStore {
    async fn log_interaction(&self, interaction: NewAiInteraction) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_interactions (
                id, user_id, entry_id, interaction_type, input_data, ai_response, model_version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(interaction.user_id)
        .bind(interaction.entry_id)
        .bind(interaction.interaction_type)
        .bind(&interaction.input_data)
        .bind(&interaction.ai_response)
        .bind(&interaction.model_version)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }
}
