use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One mention of a story in a briefing. Dates are the caller's canonical
/// `YYYY-MM-DD`-prefixed strings; the tracker only ever compares the first
/// ten characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryMention {
    pub date: String,
    pub angle: String,
    pub key_fact: String,
}

/// Lifecycle state of a tracked narrative.
///
/// `Resolved` is part of the stored vocabulary but no tracker code path
/// assigns it; see DESIGN.md.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    Active,
    Fading,
    Resolved,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Active => "active",
            StoryStatus::Fading => "fading",
            StoryStatus::Resolved => "resolved",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(StoryStatus::Active),
            "fading" => Some(StoryStatus::Fading),
            "resolved" => Some(StoryStatus::Resolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user continuity record for a recurring narrative, keyed by
/// `(user_id, story_key)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryTrackerRecord {
    pub id: Uuid,
    pub user_id: String,
    pub story_key: String,
    /// Start of the current narrative cycle.
    pub first_mentioned: String,
    pub last_mentioned: String,
    /// Distinct calendar days mentioned in the current cycle, not intra-day
    /// repeats.
    pub mention_count: i32,
    pub status: StoryStatus,
    pub related_ticker: Option<String>,
    /// Append-only within a cycle; restarted on cycle reset.
    pub mentions: Vec<StoryMention>,
}

impl StoryTrackerRecord {
    /// A fresh cycle starting at the mention's date.
    pub fn new_cycle(
        user_id: &str,
        story_key: &str,
        mention: StoryMention,
        related_ticker: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            story_key: story_key.to_string(),
            first_mentioned: mention.date.clone(),
            last_mentioned: mention.date.clone(),
            mention_count: 1,
            status: StoryStatus::Active,
            related_ticker,
            mentions: vec![mention],
        }
    }
}

/// Partial update applied by a store's `update`; `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct StoryTrackerUpdate {
    pub first_mentioned: Option<String>,
    pub last_mentioned: Option<String>,
    pub mention_count: Option<i32>,
    pub status: Option<StoryStatus>,
    pub mentions: Option<Vec<StoryMention>>,
}
