use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::story_tracker_queries;
use crate::errors::AppError;
use crate::models::{StoryTrackerRecord, StoryTrackerUpdate};
use crate::store::StoryTrackerStore;

/// Postgres-backed store over the `story_trackers` table (see migrations/).
#[derive(Clone)]
pub struct PgStoryTrackerStore {
    pool: PgPool,
}

impl PgStoryTrackerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryTrackerStore for PgStoryTrackerStore {
    async fn find_one(
        &self,
        user_id: &str,
        story_key: &str,
    ) -> Result<Option<StoryTrackerRecord>, AppError> {
        story_tracker_queries::find_story_tracker(&self.pool, user_id, story_key).await
    }

    async fn create(&self, record: StoryTrackerRecord) -> Result<Uuid, AppError> {
        story_tracker_queries::insert_story_tracker(&self.pool, &record).await
    }

    async fn update(&self, id: Uuid, update: StoryTrackerUpdate) -> Result<(), AppError> {
        story_tracker_queries::update_story_tracker(&self.pool, id, update).await
    }
}
