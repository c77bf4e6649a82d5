use chrono::NaiveDate;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{StoryMention, StoryStatus, StoryTrackerRecord, StoryTrackerUpdate};
use crate::services::text_analysis::normalize;
use crate::store::StoryTrackerStore;

/// A story becomes fading once it has been mentioned on this many days.
const FADING_THRESHOLD: i32 = 6;
/// A mention this many days after the cycle start restarts the narrative.
const CYCLE_RESET_DAYS: i64 = 7;
/// Hard cap on mention_count to bound storage.
const MENTION_COUNT_CAP: i32 = 99;

const FALLBACK_KEY_MAX_CHARS: usize = 40;
const WATCH_KEY_EVENT_MAX_CHARS: usize = 30;
const INTRA_DAY_ANGLE_MAX_CHARS: usize = 80;

/// Content-derived story key for macro and portfolio stories with no explicit
/// key: first six normalized words joined by underscores, capped at 40 chars.
pub fn generate_fallback_key(text: &str) -> String {
    let normalized = normalize(text);
    let joined = normalized
        .split_whitespace()
        .take(6)
        .collect::<Vec<_>>()
        .join("_");
    truncate_chars(&joined, FALLBACK_KEY_MAX_CHARS)
}

/// Stable key for an economic-calendar watch item: one key per distinct
/// (event, date) pair, namespaced apart from content-derived keys.
pub fn watch_item_story_key(event: &str, date: &str) -> String {
    let normalized = normalize(event);
    let event_part = truncate_chars(
        &normalized.split_whitespace().collect::<Vec<_>>().join("_"),
        WATCH_KEY_EVENT_MAX_CHARS,
    );
    format!("watch:{}_{}", event_part, truncate_chars(date, 10))
}

/// Options for `upsert_story_tracker`.
#[derive(Debug, Clone, Default)]
pub struct UpsertOptions {
    /// Portfolio symbol the story relates to; `None` for macro/watch-item
    /// stories.
    pub related_ticker: Option<String>,
}

/// Record a story mention for a user, creating or updating the continuity
/// record for `(user_id, story_key)`.
///
/// Decision order: create when no record exists; suppress (append-only) when
/// the story was already mentioned today; reset the cycle when the current
/// one started 7+ days ago; otherwise count a new day.
///
/// Store errors propagate untouched; retry is the caller's concern.
pub async fn upsert_story_tracker(
    store: &dyn StoryTrackerStore,
    user_id: &str,
    story_key: &str,
    mention: StoryMention,
    options: UpsertOptions,
) -> Result<(), AppError> {
    let existing = store.find_one(user_id, story_key).await?;

    let Some(record) = existing else {
        debug!("Creating story tracker for key {}", story_key);
        let record =
            StoryTrackerRecord::new_cycle(user_id, story_key, mention, options.related_ticker);
        store.create(record).await?;
        return Ok(());
    };

    if record
        .mentions
        .iter()
        .any(|m| same_calendar_day(&m.date, &mention.date))
    {
        // Already mentioned today: keep the record idempotent across repeat
        // briefings, recording the extra angle without counting a new day.
        let mut mentions = record.mentions.clone();
        mentions.push(StoryMention {
            date: mention.date.clone(),
            angle: format!(
                "[intra-day] {}",
                truncate_chars(&mention.angle, INTRA_DAY_ANGLE_MAX_CHARS)
            ),
            key_fact: mention.key_fact,
        });
        store
            .update(
                record.id,
                StoryTrackerUpdate {
                    last_mentioned: Some(mention.date),
                    mentions: Some(mentions),
                    ..Default::default()
                },
            )
            .await?;
        return Ok(());
    }

    if cycle_expired(&record.first_mentioned, &mention.date) {
        debug!("Resetting narrative cycle for key {}", story_key);
        store
            .update(
                record.id,
                StoryTrackerUpdate {
                    first_mentioned: Some(mention.date.clone()),
                    last_mentioned: Some(mention.date.clone()),
                    mention_count: Some(1),
                    status: Some(StoryStatus::Active),
                    mentions: Some(vec![mention]),
                },
            )
            .await?;
        return Ok(());
    }

    let new_count = (record.mention_count + 1).min(MENTION_COUNT_CAP);
    let status = if new_count >= FADING_THRESHOLD {
        StoryStatus::Fading
    } else {
        record.status
    };
    let mut mentions = record.mentions.clone();
    mentions.push(mention.clone());
    store
        .update(
            record.id,
            StoryTrackerUpdate {
                last_mentioned: Some(mention.date),
                mention_count: Some(new_count),
                status: Some(status),
                mentions: Some(mentions),
                ..Default::default()
            },
        )
        .await?;
    Ok(())
}

/// Compare the `YYYY-MM-DD` prefixes of two date strings. Inputs are assumed
/// to already be in the caller's canonical form; no timezone handling here.
fn same_calendar_day(a: &str, b: &str) -> bool {
    day_prefix(a) == day_prefix(b)
}

fn day_prefix(date: &str) -> &str {
    date.get(..10).unwrap_or(date)
}

/// Whether `current` falls 7+ calendar days after the cycle start.
/// Unparseable dates fail closed: bad input never forces a reset.
fn cycle_expired(first_mentioned: &str, current: &str) -> bool {
    days_between(first_mentioned, current)
        .map(|days| days >= CYCLE_RESET_DAYS)
        .unwrap_or(false)
}

fn days_between(from: &str, to: &str) -> Option<i64> {
    let from = NaiveDate::parse_from_str(day_prefix(from), "%Y-%m-%d").ok()?;
    let to = NaiveDate::parse_from_str(day_prefix(to), "%Y-%m-%d").ok()?;
    Some((to - from).num_days())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
