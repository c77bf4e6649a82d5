use std::sync::LazyLock;

use regex::Regex;

use crate::models::NewsCategory;

/// Keyword groups checked in priority order; the first match wins and
/// anything unmatched defaults to markets.
static CATEGORY_PATTERNS: LazyLock<Vec<(NewsCategory, Regex)>> = LazyLock::new(|| {
    vec![
        (
            NewsCategory::Crypto,
            Regex::new(r"(?i)\b(bitcoin|ethereum|btc|eth|blockchain|defi|nft)\b").unwrap(),
        ),
        (
            NewsCategory::RealEstate,
            Regex::new(r"(?i)real estate|housing|mortgage|property|\brent|home price").unwrap(),
        ),
        (
            NewsCategory::Commodities,
            Regex::new(r"(?i)\boil\b|\bgold\b|\bsilver\b|commodit|\bwheat\b|\bcorn\b|natural gas")
                .unwrap(),
        ),
        (
            NewsCategory::Technology,
            Regex::new(
                r"(?i)\btech|software|\bai\b|artificial intelligence|\bchips?\b|semiconductor|\bapple\b|\bgoogle\b|\bmicrosoft\b|\bamazon\b|\bmeta\b|\bnvidia\b|\btesla\b",
            )
            .unwrap(),
        ),
        (
            NewsCategory::Economy,
            Regex::new(
                r"(?i)\bfed\b|federal reserve|inflation|\bgdp\b|unemployment|interest rate|\beconom|recession|jobs report",
            )
            .unwrap(),
        ),
        (
            NewsCategory::Markets,
            Regex::new(
                r"(?i)\bstocks?\b|\bmarkets?\b|s&p|nasdaq|\bdow\b|earnings|\bipo\b|mergers?\b|acquisition",
            )
            .unwrap(),
        ),
    ]
});

/// Classify an article by keyword matching over its headline and summary.
pub fn detect_category(headline: &str, summary: &str) -> NewsCategory {
    let text = format!("{} {}", headline, summary);
    for (category, pattern) in CATEGORY_PATTERNS.iter() {
        if pattern.is_match(&text) {
            return *category;
        }
    }
    NewsCategory::Markets
}

/// Canned "why it matters" line per category, used by the narration layer
/// when the generated explanation is unavailable.
pub fn fallback_context(category: NewsCategory) -> &'static str {
    match category {
        NewsCategory::Crypto => {
            "Crypto moves can spill over into risk appetite across your portfolio."
        }
        NewsCategory::RealEstate => {
            "Housing trends shape borrowing costs and consumer spending power."
        }
        NewsCategory::Commodities => {
            "Commodity prices feed into inflation and the costs companies pass on."
        }
        NewsCategory::Technology => {
            "Tech names carry heavy index weight, so their swings move the broader market."
        }
        NewsCategory::Economy => {
            "Macro data like this drives rate expectations and market direction."
        }
        NewsCategory::Markets => {
            "Broad market moves affect nearly every diversified portfolio."
        }
    }
}
