use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::auth::middleware::AuthUser;
use crate::dto::TodayQuery;
use crate::error::AppResult;
use crate::services::birthday::CelebrationOutcome;
use crate::AppState;

/// GET /api/birthday
pub async fn resolve_birthday(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<TodayQuery>,
) -> AppResult<Json<CelebrationOutcome>> {
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let outcome = state.services.birthdays.resolve(auth_user.id, today).await?;
    Ok(Json(outcome))
}
