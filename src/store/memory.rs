use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{StoryTrackerRecord, StoryTrackerUpdate};
use crate::store::{apply_update, StoryTrackerStore};

/// Thread-safe in-memory store, for tests and single-process callers.
#[derive(Clone, Default)]
pub struct InMemoryStoryTrackerStore {
    records: Arc<DashMap<Uuid, StoryTrackerRecord>>,
}

impl InMemoryStoryTrackerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl StoryTrackerStore for InMemoryStoryTrackerStore {
    async fn find_one(
        &self,
        user_id: &str,
        story_key: &str,
    ) -> Result<Option<StoryTrackerRecord>, AppError> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.user_id == user_id && entry.story_key == story_key)
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, record: StoryTrackerRecord) -> Result<Uuid, AppError> {
        let id = record.id;
        self.records.insert(id, record);
        Ok(id)
    }

    async fn update(&self, id: Uuid, update: StoryTrackerUpdate) -> Result<(), AppError> {
        let mut entry = self.records.get_mut(&id).ok_or(AppError::NotFound)?;
        apply_update(entry.value_mut(), update);
        Ok(())
    }
}
