use std::collections::HashSet;

use tracing::debug;

use crate::models::{Article, NewsCategory};
use crate::services::categorizer::detect_category;
use crate::services::text_analysis::{jaccard_similarity, tokenize};

/// Token overlap required to call two same-category articles the same story.
const SAME_CATEGORY_THRESHOLD: f64 = 0.58;
/// Cross-category matches need much higher overlap before being collapsed.
const CROSS_CATEGORY_THRESHOLD: f64 = 0.72;

/// Proper-noun-like tokens whose shared presence alone should not trigger a
/// duplicate call: two stories that both mention "Fed" and "Powell" but share
/// little else are different stories.
const ENTITY_TOKENS: &[&str] = &[
    "fed", "federal", "reserve", "powell", "doj", "trump", "court", "supreme",
];

fn article_category(article: &Article) -> NewsCategory {
    article.category.unwrap_or_else(|| {
        detect_category(
            article.headline_text().unwrap_or(""),
            article.summary.as_deref().unwrap_or(""),
        )
    })
}

/// Judge whether two articles cover the same underlying story.
///
/// Token-overlap Jaccard over headline + summary, with category-aware
/// thresholds and an entity-overlap exception. Articles with no usable text
/// produce empty token sets and never register as duplicates.
pub fn is_near_duplicate(a: &Article, b: &Article) -> bool {
    let tokens_a = tokenize(&a.matching_text());
    let tokens_b = tokenize(&b.matching_text());
    let similarity = jaccard_similarity(&tokens_a, &tokens_b);

    let common: Vec<&String> = tokens_a.intersection(&tokens_b).collect();
    let entity_overlap = common
        .iter()
        .filter(|t| ENTITY_TOKENS.contains(&t.as_str()))
        .count();
    let other_overlap = common.len() - entity_overlap;

    // Shared entities with little else in common means two distinct stories
    // about the same actor, regardless of the similarity score.
    if other_overlap <= 2 && entity_overlap >= 2 {
        return false;
    }

    let threshold = if article_category(a) == article_category(b) {
        SAME_CATEGORY_THRESHOLD
    } else {
        CROSS_CATEGORY_THRESHOLD
    };
    similarity >= threshold
}

/// Greedy diverse top-K selection over a candidate list already sorted by
/// relevance: walk the list in order, keep an article only if it is not a
/// near-duplicate of anything kept so far, stop at `k`.
///
/// Order-dependent by design; earlier choices are never reconsidered, and the
/// caller's backfill logic relies on exactly this behavior.
pub fn pick_diverse_top_k(candidates: &[Article], k: usize) -> Vec<Article> {
    let mut picked: Vec<Article> = Vec::new();
    for article in candidates {
        if picked.len() >= k {
            break;
        }
        if article.headline_text().is_none() {
            continue;
        }
        if picked.iter().any(|p| is_near_duplicate(article, p)) {
            continue;
        }
        picked.push(article.clone());
    }
    picked
}

/// Diversify over a window of the pool, then top up from the full pool by
/// identity key until `k` articles or exhaustion.
///
/// The window is `max(40, k * 8)` so diversification sees far more candidates
/// than it keeps; backfilled articles skip anything already picked and
/// anything lacking an identity or headline.
pub fn select_diverse_with_backfill(pool: &[Article], k: usize) -> Vec<Article> {
    let window = pool.len().min(std::cmp::max(40, k.saturating_mul(8)));
    let mut picked = pick_diverse_top_k(&pool[..window], k);

    if picked.len() < k {
        let mut used: HashSet<String> = picked
            .iter()
            .filter_map(|p| p.identity_key().map(str::to_string))
            .collect();
        for article in pool {
            if picked.len() >= k {
                break;
            }
            let Some(key) = article.identity_key() else {
                continue;
            };
            if used.contains(key) || article.headline_text().is_none() {
                continue;
            }
            used.insert(key.to_string());
            picked.push(article.clone());
        }
    }

    debug!(
        "Selected {} of {} requested articles from a pool of {}",
        picked.len(),
        k,
        pool.len()
    );
    picked
}
