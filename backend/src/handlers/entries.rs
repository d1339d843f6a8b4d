use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateEntryRequest, CreateEntryResponse, DeleteResponse, ListEntriesQuery};
use crate::error::{AppError, AppResult};
use crate::models::entry::{EntryQuery, JournalEntry};
use crate::services::journal::EntrySubmission;
use crate::AppState;

const DEFAULT_AUDIO_MIME: &str = "audio/webm";

fn submission(body: CreateEntryRequest) -> AppResult<EntrySubmission> {
    match (body.content, body.audio) {
        (Some(content), None) => Ok(EntrySubmission::Text { content }),
        (None, Some(encoded)) => {
            let audio = STANDARD
                .decode(encoded.trim())
                .map_err(|_| AppError::Validation("Audio must be base64 encoded".into()))?;
            Ok(EntrySubmission::Audio {
                audio,
                mime_type: body.mime_type.unwrap_or_else(|| DEFAULT_AUDIO_MIME.into()),
            })
        }
        _ => Err(AppError::Validation(
            "Provide either content or audio".into(),
        )),
    }
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<CreateEntryResponse>)> {
    body.validate()?;
    let submitted = state
        .services
        .journal
        .submit(auth_user.id, submission(body)?, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            entry: submitted.entry,
            used_fallback: submitted.used_fallback,
        }),
    ))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListEntriesQuery>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    query.validate()?;
    let query = EntryQuery {
        since: query.since,
        until: query.until,
        limit: query.limit,
    };
    Ok(Json(state.services.journal.list(auth_user.id, &query).await?))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<JournalEntry>> {
    Ok(Json(state.services.journal.get(auth_user.id, entry_id).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.journal.delete(auth_user.id, entry_id).await?;
    Ok(Json(DeleteResponse {
        deleted: true,
        id: entry_id,
    }))
}
