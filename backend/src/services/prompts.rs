use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::error::AppResult;
use crate::models::prompt::DailyPrompt;
use crate::store::PromptStore;

/// How many of the least used prompts a random pick is drawn from.
const RANDOM_POOL: i64 = 10;

#[derive(Clone)]
pub struct PromptService {
    prompts: Arc<dyn PromptStore>,
}

impl PromptService {
    pub fn new(prompts: Arc<dyn PromptStore>) -> Self {
        Self { prompts }
    }

    pub async fn list(&self, limit: i64) -> AppResult<Vec<DailyPrompt>> {
        Ok(self.prompts.list_prompts(limit).await?)
    }

    /// Picks one of the least used active prompts and counts the use.
    /// `None` when no prompt is active.
    pub async fn random(&self) -> AppResult<Option<DailyPrompt>> {
        let pool = self.prompts.list_prompts(RANDOM_POOL).await?;
        // ThreadRng is !Send; drop it before the next await.
        let picked = {
            let mut rng = rand::thread_rng();
            pool.choose(&mut rng).cloned()
        };
        let Some(mut prompt) = picked else {
            return Ok(None);
        };

        match self.prompts.record_prompt_use(prompt.id).await {
            Ok(()) => prompt.usage_count += 1,
            Err(e) => tracing::warn!(prompt_id = %prompt.id, error = %e, "Failed to record prompt use"),
        }
        Ok(Some(prompt))
    }
}
