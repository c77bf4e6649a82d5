use std::collections::HashSet;

/// Words too generic to signal that two headlines cover the same story.
/// Two-letter-and-shorter words are filtered separately by `tokenize`.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "that", "this", "these", "those", "after", "before",
    "over", "under", "amid", "into", "about", "against", "between", "during", "their", "its",
    "has", "have", "had", "was", "were", "are", "been", "being", "will", "would", "could",
    "says", "said", "new", "news", "report", "reports", "today", "tonight", "week", "month",
    "year", "latest", "update",
];

/// Lowercase, strip everything that is not alphanumeric or whitespace, and
/// collapse runs of whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Token set over normalized text, minus stop words and words of length <= 2.
pub fn tokenize(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of two token sets. Empty sets never match anything.
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
