use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{StoryMention, StoryStatus, StoryTrackerRecord, StoryTrackerUpdate};

/// Raw table shape; mentions live in a JSONB column and are validated into
/// the typed list at this boundary.
#[derive(Debug, FromRow)]
struct StoryTrackerRow {
    id: Uuid,
    user_id: String,
    story_key: String,
    first_mentioned: String,
    last_mentioned: String,
    mention_count: i32,
    status: String,
    related_ticker: Option<String>,
    mentions: serde_json::Value,
}

impl StoryTrackerRow {
    fn into_record(self) -> Result<StoryTrackerRecord, AppError> {
        let status = StoryStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Validation(format!("unknown story status '{}'", self.status))
        })?;
        let mentions: Vec<StoryMention> = serde_json::from_value(self.mentions)
            .map_err(|e| AppError::Validation(format!("malformed mentions payload: {}", e)))?;
        Ok(StoryTrackerRecord {
            id: self.id,
            user_id: self.user_id,
            story_key: self.story_key,
            first_mentioned: self.first_mentioned,
            last_mentioned: self.last_mentioned,
            mention_count: self.mention_count,
            status,
            related_ticker: self.related_ticker,
            mentions,
        })
    }
}

pub async fn find_story_tracker(
    pool: &PgPool,
    user_id: &str,
    story_key: &str,
) -> Result<Option<StoryTrackerRecord>, AppError> {
    let row = sqlx::query_as::<_, StoryTrackerRow>(
        "SELECT id, user_id, story_key, first_mentioned, last_mentioned,
                mention_count, status, related_ticker, mentions
         FROM story_trackers
         WHERE user_id = $1 AND story_key = $2",
    )
    .bind(user_id)
    .bind(story_key)
    .fetch_optional(pool)
    .await?;

    row.map(StoryTrackerRow::into_record).transpose()
}

pub async fn insert_story_tracker(
    pool: &PgPool,
    record: &StoryTrackerRecord,
) -> Result<Uuid, AppError> {
    let mentions = serde_json::to_value(&record.mentions)
        .map_err(|e| AppError::Validation(format!("unserializable mentions: {}", e)))?;

    sqlx::query(
        "INSERT INTO story_trackers
            (id, user_id, story_key, first_mentioned, last_mentioned,
             mention_count, status, related_ticker, mentions)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(record.id)
    .bind(&record.user_id)
    .bind(&record.story_key)
    .bind(&record.first_mentioned)
    .bind(&record.last_mentioned)
    .bind(record.mention_count)
    .bind(record.status.as_str())
    .bind(&record.related_ticker)
    .bind(mentions)
    .execute(pool)
    .await?;

    Ok(record.id)
}

pub async fn update_story_tracker(
    pool: &PgPool,
    id: Uuid,
    update: StoryTrackerUpdate,
) -> Result<(), AppError> {
    let mentions = update
        .mentions
        .map(|m| {
            serde_json::to_value(m)
                .map_err(|e| AppError::Validation(format!("unserializable mentions: {}", e)))
        })
        .transpose()?;

    let result = sqlx::query(
        "UPDATE story_trackers SET
            first_mentioned = COALESCE($2, first_mentioned),
            last_mentioned = COALESCE($3, last_mentioned),
            mention_count = COALESCE($4, mention_count),
            status = COALESCE($5, status),
            mentions = COALESCE($6, mentions),
            updated_at = now()
         WHERE id = $1",
    )
    .bind(id)
    .bind(update.first_mentioned)
    .bind(update.last_mentioned)
    .bind(update.mention_count)
    .bind(update.status.map(|s| s.as_str().to_string()))
    .bind(mentions)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
