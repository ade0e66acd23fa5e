//! Single-pass keyword categorizer
//!
//! Independent of the cascade in [`super::ExpenseClassifier`]: no
//! normalization beyond lowercasing, no word splitting, no fuzzy matching.

use serde::Serialize;

use crate::models::Category;

/// Keyword table, checked in order; the first category with a hit wins
const SIMPLE_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "food", "eat", "restaurant", "grocery", "coffee", "lunch", "dinner", "snack", "pizza",
            "burger", "cafe",
        ],
    ),
    (
        Category::Transportation,
        &[
            "taxi", "bus", "gas", "train", "metro", "transport", "fuel", "parking", "car", "bike",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "movie",
            "concert",
            "game",
            "netflix",
            "spotify",
            "play",
            "entertainment",
            "cinema",
            "ticket",
        ],
    ),
    (
        Category::Utilities,
        &["electric", "water", "internet", "phone", "bill", "utility", "power", "wifi"],
    ),
    (
        Category::Healthcare,
        &["doctor", "pharmacy", "medicine", "hospital", "health", "medical", "gym"],
    ),
    (
        Category::Shopping,
        &["shop", "buy", "store", "mall", "clothes", "amazon", "online", "product"],
    ),
];

const MATCH_CONFIDENCE: f64 = 0.85;
const DEFAULT_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimpleCategorization {
    pub category: Category,
    pub confidence: f64,
}

/// Categorize by plain substring containment against the keyword table
pub fn categorize_simple(description: &str) -> SimpleCategorization {
    let lowered = description.to_lowercase();

    SIMPLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|&(category, _)| SimpleCategorization {
            category,
            confidence: MATCH_CONFIDENCE,
        })
        .unwrap_or(SimpleCategorization {
            category: Category::Other,
            confidence: DEFAULT_CONFIDENCE,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_keyword_substring() {
        let result = categorize_simple("Monthly Netflix subscription");
        assert_eq!(result.category, Category::Entertainment);
        assert_eq!(result.confidence, 0.85);

        // "scarf" contains "car"
        assert_eq!(categorize_simple("Wool scarf").category, Category::Transportation);
    }

    #[test]
    fn test_first_category_wins() {
        // "coffee" (Food) and "phone" (Utilities) both match
        assert_eq!(categorize_simple("coffee and phone").category, Category::Food);
        // "gym" (Healthcare) and "shop" (Shopping)
        assert_eq!(categorize_simple("gym shop").category, Category::Healthcare);
    }

    #[test]
    fn test_no_match_defaults_to_other() {
        let result = categorize_simple("Quarterly tax");
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(categorize_simple("").category, Category::Other);
    }
}
