use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{HappinessQuery, HappinessResponse, SummaryQuery, SummaryResponse};
use crate::error::{AppError, AppResult};
use crate::models::analytics::{MoodAnalyticsQuery, MoodAnalyticsRow};
use crate::services::aggregate::{display_happiness, month_bounds};
use crate::services::heuristics::monthly_reflection;
use crate::AppState;

/// GET /api/analytics/moods
pub async fn list_mood_analytics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodAnalyticsQuery>,
) -> AppResult<Json<Vec<MoodAnalyticsRow>>> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(AppError::Validation("start_date must not be after end_date".into()));
        }
    }
    let rows = state
        .services
        .aggregator
        .calendar(auth_user.id, query.start_date, query.end_date)
        .await?;
    Ok(Json(rows))
}

/// GET /api/analytics/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<SummaryResponse>> {
    query.validate()?;

    let (since, until, monthly) = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            let (start, end) = month_bounds(year, month)
                .ok_or_else(|| AppError::Validation(format!("Invalid month {month}/{year}")))?;
            (Some(start), Some(end), true)
        }
        (None, None) => (query.since, query.until, false),
        _ => {
            return Err(AppError::Validation(
                "year and month must be given together".into(),
            ))
        }
    };

    let summary = state
        .services
        .aggregator
        .summarize_window(auth_user.id, since, until)
        .await?;
    let reflection = monthly.then(|| monthly_reflection(&summary.mood_summary));

    Ok(Json(SummaryResponse { summary, reflection }))
}

/// GET /api/analytics/happiness
pub async fn get_happiness(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HappinessQuery>,
) -> AppResult<Json<HappinessResponse>> {
    query.validate()?;
    let days = query.days.unwrap_or(state.config.happiness_lookback_days);
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());

    let index = state
        .services
        .aggregator
        .happiness_index(auth_user.id, today, days)
        .await?;

    Ok(Json(HappinessResponse {
        happiness_index: display_happiness(index),
        is_fallback: index.is_none(),
        days,
    }))
}
