use serde::{Deserialize, Serialize};

/// A candidate news article, as delivered by the upstream fetch layer.
///
/// Every field is optional: provider payloads are inconsistent, and the
/// selection logic degrades gracefully instead of rejecting records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<String>,
    pub headline: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub category: Option<NewsCategory>,
    /// Unix timestamp, used by the caller for relevance sorting only.
    pub datetime: Option<i64>,
}

impl Article {
    /// Headline text, falling back to the title. `None` when the article has
    /// no usable text and must be skipped by selection.
    pub fn headline_text(&self) -> Option<&str> {
        non_empty(self.headline.as_deref()).or_else(|| non_empty(self.title.as_deref()))
    }

    /// Combined headline + summary text used for similarity comparison and
    /// category detection. Missing pieces degrade to empty strings.
    pub fn matching_text(&self) -> String {
        format!(
            "{} {}",
            self.headline_text().unwrap_or(""),
            self.summary.as_deref().unwrap_or("")
        )
    }

    /// Stable identity for dedup bookkeeping during backfill:
    /// `id | url | headline`, first present wins.
    pub fn identity_key(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
            .or_else(|| non_empty(self.url.as_deref()))
            .or_else(|| self.headline_text())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Fixed news taxonomy used for category-aware duplicate thresholds and
/// display tagging.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NewsCategory {
    #[serde(rename = "crypto")]
    Crypto,
    #[serde(rename = "real estate")]
    RealEstate,
    #[serde(rename = "commodities")]
    Commodities,
    #[serde(rename = "technology")]
    Technology,
    #[serde(rename = "economy")]
    Economy,
    #[serde(rename = "markets")]
    Markets,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Crypto => "crypto",
            NewsCategory::RealEstate => "real estate",
            NewsCategory::Commodities => "commodities",
            NewsCategory::Technology => "technology",
            NewsCategory::Economy => "economy",
            NewsCategory::Markets => "markets",
        }
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
