//! Entry submission and lifecycle.
//!
//! Submitting an entry runs it through the analysis service, persists it,
//! records the interaction and refreshes that day's mood rollup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::aggregate::Aggregator;
use crate::ai::fallback::keyword_analysis;
use crate::ai::{AnalysisService, TextAnalysis};
use crate::error::{AppError, AppResult};
use crate::models::entry::{count_words, EntryQuery, EntryType, JournalEntry, NewJournalEntry};
use crate::models::interaction::NewAiInteraction;
use crate::models::profile::AiTone;
use crate::store::{EntryStore, InteractionStore, ProfileStore};

#[derive(Debug, Clone)]
pub enum EntrySubmission {
    Text { content: String },
    Audio { audio: Vec<u8>, mime_type: String },
}

#[derive(Debug, Clone)]
pub struct SubmittedEntry {
    pub entry: JournalEntry,
    /// The keyword analysis stood in for the analysis service.
    pub used_fallback: bool,
}

struct Analyzed {
    content: String,
    transcription: Option<String>,
    entry_type: EntryType,
    analysis: TextAnalysis,
    used_fallback: bool,
}

#[derive(Clone)]
pub struct JournalService {
    entries: Arc<dyn EntryStore>,
    profiles: Arc<dyn ProfileStore>,
    interactions: Arc<dyn InteractionStore>,
    ai: Arc<dyn AnalysisService>,
    aggregator: Aggregator,
    model_version: String,
}

impl JournalService {
    pub fn new(
        entries: Arc<dyn EntryStore>,
        profiles: Arc<dyn ProfileStore>,
        interactions: Arc<dyn InteractionStore>,
        ai: Arc<dyn AnalysisService>,
        aggregator: Aggregator,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            entries,
            profiles,
            interactions,
            ai,
            aggregator,
            model_version: model_version.into(),
        }
    }

    async fn tone_for(&self, user_id: Uuid) -> AppResult<AiTone> {
        Ok(self
            .profiles
            .get_preferences(user_id)
            .await?
            .map(|p| p.ai_tone)
            .unwrap_or_default())
    }

    async fn analyze(&self, submission: EntrySubmission, tone: AiTone) -> AppResult<Analyzed> {
        match submission {
            EntrySubmission::Text { content } => {
                let content = content.trim().to_string();
                if content.is_empty() {
                    return Err(AppError::Validation("Entry content is required".into()));
                }
                let (analysis, used_fallback) = match self.ai.analyze_text(&content, tone).await {
                    Ok(analysis) => (analysis, false),
                    Err(e) => {
                        tracing::warn!(error = %e, "Analysis service failed, using keyword analysis");
                        (keyword_analysis(&content), true)
                    }
                };
                Ok(Analyzed {
                    content,
                    transcription: None,
                    entry_type: EntryType::Text,
                    analysis,
                    used_fallback,
                })
            }
            EntrySubmission::Audio { audio, mime_type } => {
                if audio.is_empty() {
                    return Err(AppError::Validation("Audio recording is required".into()));
                }
                let result = self.ai.analyze_audio(&audio, &mime_type, tone).await?;
                Ok(Analyzed {
                    content: result.transcription.clone(),
                    transcription: Some(result.transcription),
                    entry_type: EntryType::Audio,
                    analysis: result.analysis,
                    used_fallback: false,
                })
            }
        }
    }

    pub async fn submit(
        &self,
        user_id: Uuid,
        submission: EntrySubmission,
        now: DateTime<Utc>,
    ) -> AppResult<SubmittedEntry> {
        let tone = self.tone_for(user_id).await?;
        let analyzed = self.analyze(submission, tone).await?;

        let entry = self
            .entries
            .insert_entry(NewJournalEntry {
                user_id,
                word_count: count_words(&analyzed.content),
                content: analyzed.content.clone(),
                mood: analyzed.analysis.mood,
                happiness_score: analyzed.analysis.happiness_score,
                ai_response: Some(analyzed.analysis.response.clone()),
                summary: Some(analyzed.analysis.summary),
                highlights: analyzed.analysis.highlights,
                entry_type: analyzed.entry_type,
                transcription: analyzed.transcription,
                created_at: now,
            })
            .await?;

        tracing::info!(
            %user_id,
            entry_id = %entry.id,
            mood = entry.mood.as_str(),
            fallback = analyzed.used_fallback,
            "Journal entry created"
        );

        if !analyzed.used_fallback {
            let interaction_type = match entry.entry_type {
                EntryType::Text => "mood_analysis",
                EntryType::Audio => "audio_transcription",
            };
            let logged = self
                .interactions
                .log_interaction(NewAiInteraction {
                    user_id,
                    entry_id: Some(entry.id),
                    interaction_type,
                    input_data: Some(analyzed.content),
                    ai_response: Some(analyzed.analysis.response),
                    model_version: self.model_version.clone(),
                })
                .await;
            if let Err(e) = logged {
                tracing::warn!(error = %e, entry_id = %entry.id, "Failed to record analysis interaction");
            }
        }

        self.aggregator
            .refresh_day(user_id, entry.created_at.date_naive())
            .await?;

        Ok(SubmittedEntry {
            entry,
            used_fallback: analyzed.used_fallback,
        })
    }

    pub async fn list(&self, user_id: Uuid, query: &EntryQuery) -> AppResult<Vec<JournalEntry>> {
        Ok(self.entries.list_entries(user_id, query).await?)
    }

    pub async fn get(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<JournalEntry> {
        self.entries
            .get_entry(user_id, entry_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entry not found".into()))
    }

    /// Deleting an entry that is already gone succeeds.
    pub async fn delete(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<()> {
        if let Some(removed) = self.entries.delete_entry(user_id, entry_id).await? {
            tracing::info!(%user_id, %entry_id, "Journal entry deleted");
            self.aggregator
                .refresh_day(user_id, removed.created_at.date_naive())
                .await?;
        }
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        Ok(self.entries.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::Mood;
    use crate::models::profile::UserPreferences;
    use crate::store::memory::InMemoryStore;
    use crate::store::{AnalyticsStore, StoreError};
    use crate::test_support::{at, ScriptedAnalysis};
    use std::sync::atomic::Ordering;

    fn service(store: &Arc<InMemoryStore>, ai: Arc<ScriptedAnalysis>) -> JournalService {
        let aggregator = Aggregator::new(store.clone(), store.clone());
        JournalService::new(store.clone(), store.clone(), store.clone(), ai, aggregator, "test-model")
    }

    fn text(content: &str) -> EntrySubmission {
        EntrySubmission::Text {
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn text_entry_is_stored_logged_and_rolled_up() {
        let store = Arc::new(InMemoryStore::new());
        let user = Uuid::new_v4();
        store
            .put_preferences(UserPreferences {
                user_id: user,
                ai_tone: AiTone::Cheerful,
            })
            .await;
        let journal = service(&store, Arc::new(ScriptedAnalysis::answering(Mood::Happy, Some(8.0))));

        let submitted = journal
            .submit(user, text("  Walked by the river at dawn  "), at(2026, 3, 10, 7, 30, 0))
            .await
            .unwrap();

        assert!(!submitted.used_fallback);
        assert_eq!(submitted.entry.content, "Walked by the river at dawn");
        assert_eq!(submitted.entry.word_count, 6);
        assert_eq!(submitted.entry.ai_response.as_deref(), Some("A cheerful reply"));

        let interactions = store.interactions().await;
        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].interaction_type, "mood_analysis");
        assert_eq!(interactions[0].model_version, "test-model");

        let day = at(2026, 3, 10, 0, 0, 0).date_naive();
        let rows = store.list_analytics(user, Some(day), Some(day)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].happiness_index, Some(8.0));
        assert_eq!(rows[0].dominant_mood, Some(Mood::Happy));
    }

    #[tokio::test]
    async fn text_entry_falls_back_to_keywords_when_analysis_fails() {
        let store = Arc::new(InMemoryStore::new());
        let user = Uuid::new_v4();
        let journal = service(&store, Arc::new(ScriptedAnalysis::failing("model overloaded")));

        let submitted = journal
            .submit(user, text("Such a wonderful day, I love it"), at(2026, 3, 10, 9, 0, 0))
            .await
            .unwrap();

        assert!(submitted.used_fallback);
        assert_eq!(submitted.entry.mood, Mood::Happy);
        assert_eq!(submitted.entry.happiness_score, None);
        assert!(store.interactions().await.is_empty());
    }

    #[tokio::test]
    async fn audio_entry_uses_the_transcription_as_content() {
        let store = Arc::new(InMemoryStore::new());
        let user = Uuid::new_v4();
        let journal = service(&store, Arc::new(ScriptedAnalysis::answering(Mood::Neutral, Some(5.0))));

        let submitted = journal
            .submit(
                user,
                EntrySubmission::Audio {
                    audio: vec![1, 2, 3],
                    mime_type: "audio/webm".into(),
                },
                at(2026, 3, 10, 9, 0, 0),
            )
            .await
            .unwrap();

        assert_eq!(submitted.entry.entry_type, EntryType::Audio);
        assert_eq!(submitted.entry.content, "spoken words about a quiet morning");
        assert_eq!(submitted.entry.transcription.as_deref(), Some("spoken words about a quiet morning"));
        assert_eq!(store.interactions().await[0].interaction_type, "audio_transcription");
    }

    #[tokio::test]
    async fn audio_analysis_failure_is_an_upstream_error() {
        let store = Arc::new(InMemoryStore::new());
        let journal = service(&store, Arc::new(ScriptedAnalysis::failing("no speech")));

        let result = journal
            .submit(
                Uuid::new_v4(),
                EntrySubmission::Audio {
                    audio: vec![1],
                    mime_type: "audio/webm".into(),
                },
                at(2026, 3, 10, 9, 0, 0),
            )
            .await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn blank_submissions_are_rejected_before_analysis() {
        let store = Arc::new(InMemoryStore::new());
        let ai = Arc::new(ScriptedAnalysis::answering(Mood::Happy, None));
        let journal = service(&store, ai.clone());

        let result = journal.submit(Uuid::new_v4(), text("   "), at(2026, 3, 10, 9, 0, 0)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(ai.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deleting_the_last_entry_of_a_day_clears_its_rollup() {
        let store = Arc::new(InMemoryStore::new());
        let user = Uuid::new_v4();
        let journal = service(&store, Arc::new(ScriptedAnalysis::answering(Mood::Sad, Some(2.0))));
        let submitted = journal
            .submit(user, text("Rough one"), at(2026, 3, 10, 9, 0, 0))
            .await
            .unwrap();

        journal.delete(user, submitted.entry.id).await.unwrap();
        journal.delete(user, submitted.entry.id).await.unwrap();

        assert!(store.list_analytics(user, None, None).await.unwrap().is_empty());
        assert!(matches!(
            journal.get(user, submitted.entry.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn entries_are_scoped_to_their_owner() {
        let store = Arc::new(InMemoryStore::new());
        let owner = Uuid::new_v4();
        let journal = service(&store, Arc::new(ScriptedAnalysis::answering(Mood::Happy, Some(7.0))));
        let submitted = journal
            .submit(owner, text("Mine"), at(2026, 3, 10, 9, 0, 0))
            .await
            .unwrap();

        let stranger = Uuid::new_v4();
        assert!(matches!(
            journal.get(stranger, submitted.entry.id).await,
            Err(AppError::NotFound(_))
        ));
        journal.delete(stranger, submitted.entry.id).await.unwrap();
        assert!(journal.get(owner, submitted.entry.id).await.is_ok());
    }

    #[tokio::test]
    async fn ping_reports_store_outage() {
        let store = Arc::new(InMemoryStore::new());
        let journal = service(&store, Arc::new(ScriptedAnalysis::answering(Mood::Happy, None)));
        assert!(journal.ping().await.is_ok());

        store.set_offline(true);
        assert!(matches!(
            journal.ping().await,
            Err(AppError::Store(StoreError::Unavailable(_)))
        ));
    }
}
