use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::auth::middleware::AuthUser;
use crate::dto::{PendingRewindResponse, TodayQuery};
use crate::error::AppResult;
use crate::models::rewind::MonthlyRewind;
use crate::AppState;

/// GET /api/rewinds/:year/:month
pub async fn get_rewind(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<MonthlyRewind>> {
    let rewind = state
        .services
        .rewinds
        .get_or_generate(auth_user.id, month, year)
        .await?;
    Ok(Json(rewind))
}

/// GET /api/rewinds/pending
pub async fn pending_rewind(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<TodayQuery>,
) -> AppResult<Json<PendingRewindResponse>> {
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let rewind = state
        .services
        .rewinds
        .pending(auth_user.id, today, state.config.rewind_window_days)
        .await?;
    Ok(Json(PendingRewindResponse { rewind }))
}
