use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{WellnessQuery, WellnessRequest};
use crate::error::AppResult;
use crate::models::wellness::WellnessMetrics;
use crate::AppState;

/// GET /api/wellness
pub async fn list_wellness(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<WellnessQuery>,
) -> AppResult<Json<Vec<WellnessMetrics>>> {
    let rows = state
        .services
        .wellness
        .list(auth_user.id, query.start_date, query.end_date)
        .await?;
    Ok(Json(rows))
}

/// PUT /api/wellness
pub async fn record_wellness(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<WellnessRequest>,
) -> AppResult<Json<WellnessMetrics>> {
    body.validate()?;
    let today = body.today.unwrap_or_else(|| Utc::now().date_naive());
    let date = body.date.unwrap_or(today);

    let row = state
        .services
        .wellness
        .record(auth_user.id, date, body.into_update(), today)
        .await?;
    Ok(Json(row))
}
