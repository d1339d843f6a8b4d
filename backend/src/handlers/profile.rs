use axum::{extract::State, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{UpdatePreferencesRequest, UpsertProfileRequest};
use crate::error::AppResult;
use crate::models::profile::{Profile, UserPreferences};
use crate::services::profile::ProfileUpdate;
use crate::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Profile>> {
    let profile = state.services.profiles.get(auth_user.id).await?;
    Ok(Json(profile))
}

/// PUT /api/profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertProfileRequest>,
) -> AppResult<Json<Profile>> {
    body.validate()?;
    let today = body.today.unwrap_or_else(|| Utc::now().date_naive());
    let update = ProfileUpdate {
        full_name: body.full_name,
        email: body.email,
        date_of_birth: body.date_of_birth,
        timezone: body.timezone,
    };

    let profile = state
        .services
        .profiles
        .save(auth_user.id, auth_user.email.as_deref(), update, today)
        .await?;
    Ok(Json(profile))
}

/// GET /api/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state.services.profiles.preferences(auth_user.id).await?;
    Ok(Json(preferences))
}

/// PUT /api/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state
        .services
        .profiles
        .update_preferences(auth_user.id, body.ai_tone)
        .await?;
    Ok(Json(preferences))
}
