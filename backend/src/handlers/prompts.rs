use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::dto::{ListPromptsQuery, RandomPromptResponse};
use crate::error::AppResult;
use crate::models::prompt::DailyPrompt;
use crate::AppState;

const DEFAULT_LIMIT: i64 = 10;

/// GET /api/prompts
pub async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<ListPromptsQuery>,
) -> AppResult<Json<Vec<DailyPrompt>>> {
    query.validate()?;
    let prompts = state
        .services
        .prompts
        .list(query.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(prompts))
}

/// GET /api/prompts/random
pub async fn random_prompt(State(state): State<AppState>) -> AppResult<Json<RandomPromptResponse>> {
    let prompt = state.services.prompts.random().await?;
    Ok(Json(RandomPromptResponse { prompt }))
}
