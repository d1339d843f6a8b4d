use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::wellness::{WellnessMetrics, WellnessUpdate};
use crate::store::WellnessStore;

#[derive(Clone)]
pub struct WellnessService {
    wellness: Arc<dyn WellnessStore>,
}

impl WellnessService {
    pub fn new(wellness: Arc<dyn WellnessStore>) -> Self {
        Self { wellness }
    }

    /// Merge `update` into the day's row. Days after `today` are rejected.
    pub async fn record(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        update: WellnessUpdate,
        today: NaiveDate,
    ) -> AppResult<WellnessMetrics> {
        if date > today {
            return Err(AppError::Validation(format!(
                "Cannot record wellness for {date}, which is after {today}"
            )));
        }
        let row = self.wellness.upsert_wellness(user_id, date, update).await?;
        tracing::debug!(user_id = %user_id, date = %date, "Wellness metrics recorded");
        Ok(row)
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<WellnessMetrics>> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(AppError::Validation("start_date must not be after end_date".into()));
            }
        }
        Ok(self.wellness.list_wellness(user_id, start, end).await?)
    }
}
