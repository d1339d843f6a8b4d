//! Profile and preference upkeep.
//!
//! The auth provider owns identity; this service only stores what the
//! journal needs about a user: display name, birthday, contact email and the
//! tone the analysis service should answer in.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::profile::{AiTone, NewProfile, Profile, UserPreferences};
use crate::store::ProfileStore;

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub full_name: String,
    /// Overrides the email carried by the access token.
    pub email: Option<String>,
    pub date_of_birth: NaiveDate,
    pub timezone: Option<String>,
}

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    pub async fn get(&self, user_id: Uuid) -> AppResult<Profile> {
        self.profiles
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".into()))
    }

    /// Create or replace the caller's profile. `token_email` is used when the
    /// request does not name an email.
    pub async fn save(
        &self,
        user_id: Uuid,
        token_email: Option<&str>,
        update: ProfileUpdate,
        today: NaiveDate,
    ) -> AppResult<Profile> {
        let full_name = update.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(AppError::Validation("Full name is required".into()));
        }
        if update.date_of_birth > today {
            return Err(AppError::Validation(
                "Date of birth cannot be in the future".into(),
            ));
        }
        let email = update
            .email
            .or_else(|| token_email.map(str::to_string))
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AppError::Validation("An email address is required".into()))?;
        let timezone = update.timezone.filter(|tz| !tz.trim().is_empty());

        let profile = self
            .profiles
            .upsert_profile(NewProfile {
                id: user_id,
                full_name,
                email,
                date_of_birth: update.date_of_birth,
                timezone,
            })
            .await?;

        tracing::info!(user_id = %user_id, "Profile saved");
        Ok(profile)
    }

    /// Stored preferences, or the defaults when the user never set any.
    pub async fn preferences(&self, user_id: Uuid) -> AppResult<UserPreferences> {
        Ok(self
            .profiles
            .get_preferences(user_id)
            .await?
            .unwrap_or(UserPreferences {
                user_id,
                ai_tone: AiTone::default(),
            }))
    }

    pub async fn update_preferences(&self, user_id: Uuid, ai_tone: AiTone) -> AppResult<UserPreferences> {
        // Preferences hang off the profile row.
        if self.profiles.get_profile(user_id).await?.is_none() {
            return Err(AppError::NotFound(
                "Create a profile before setting preferences".into(),
            ));
        }
        let saved = self
            .profiles
            .upsert_preferences(UserPreferences { user_id, ai_tone })
            .await?;
        tracing::info!(user_id = %user_id, ai_tone = ai_tone.as_str(), "Preferences updated");
        Ok(saved)
    }
}
