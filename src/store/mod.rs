use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{StoryTrackerRecord, StoryTrackerUpdate};

mod memory;
mod postgres;

pub use memory::InMemoryStoryTrackerStore;
pub use postgres::PgStoryTrackerStore;

/// Storage collaborator for story tracker records, treated as a key-value
/// store keyed by `(user_id, story_key)` with at most one matching record.
///
/// The tracker owns the decision logic; implementations own persistence,
/// retries, and consistency. Concurrent upserts for the same key are
/// last-write-wins by design.
#[async_trait]
pub trait StoryTrackerStore: Send + Sync {
    async fn find_one(
        &self,
        user_id: &str,
        story_key: &str,
    ) -> Result<Option<StoryTrackerRecord>, AppError>;

    async fn create(&self, record: StoryTrackerRecord) -> Result<Uuid, AppError>;

    async fn update(&self, id: Uuid, update: StoryTrackerUpdate) -> Result<(), AppError>;
}

/// Merge a partial update into a record. Shared by store implementations
/// that materialize the whole record.
pub(crate) fn apply_update(record: &mut StoryTrackerRecord, update: StoryTrackerUpdate) {
    if let Some(first_mentioned) = update.first_mentioned {
        record.first_mentioned = first_mentioned;
    }
    if let Some(last_mentioned) = update.last_mentioned {
        record.last_mentioned = last_mentioned;
    }
    if let Some(mention_count) = update.mention_count {
        record.mention_count = mention_count;
    }
    if let Some(status) = update.status {
        record.status = status;
    }
    if let Some(mentions) = update.mentions {
        record.mentions = mentions;
    }
}
