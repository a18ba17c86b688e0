//! Keyword-based product categorization.
//!
//! The taxonomy is scanned in declaration order and the first category with a
//! matching stem wins. A stem matches when the item name contains it or when
//! it contains the item name, so "whole milk" and "milk" both land in Dairy.
//! The reverse direction also means very short names ("a", "e") match the
//! first stem that happens to contain them. That imprecision is accepted; no
//! specificity ranking is applied.

use serde::{Deserialize, Serialize};

/// Label returned when no stem matches.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Builtin taxonomy. Order is significant.
pub const TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Dairy",
        &["milk", "cheese", "yogurt", "butter", "cream", "egg"],
    ),
    (
        "Produce",
        &[
            "apple", "banana", "oranges", "lettuce", "tomato", "potato", "onion", "carrot",
            "vegetable", "fruit", "berries", "grape", "lemon", "spinach", "melon", "avocado",
            "garlic", "corn", "asparagus", "pumpkin", "squash", "cabbage",
        ],
    ),
    (
        "Meat",
        &[
            "chicken", "beef", "pork", "turkey", "steak", "fish", "salmon", "bacon", "sausage",
            "meat",
        ],
    ),
    (
        "Bakery",
        &["bread", "bagel", "muffin", "croissant", "bun", "cake", "tortilla"],
    ),
    (
        "Pantry",
        &[
            "rice", "pasta", "flour", "sugar", "cereal", "beans", "sauce", "olive oil", "salt",
            "spice", "soup", "seasoning",
        ],
    ),
    (
        "Beverages",
        &["juice", "coffee", "tea", "water", "soda", "wine", "beer"],
    ),
    (
        "Snacks",
        &[
            "chips", "cookies", "crackers", "candy", "chocolate", "nuts", "popcorn", "pretzel",
        ],
    ),
    (
        "Household",
        &[
            "toilet paper", "paper towel", "soap", "detergent", "shampoo", "toothpaste",
            "trash bag", "sponge", "tissue",
        ],
    ),
    ("Frozen", &["frozen", "ice cream", "pizza", "ice"]),
];

/// Categorize with the builtin taxonomy.
///
/// Shared by anything that needs labels consistent with the parser, such as
/// recommenders.
pub fn categorize(name: &str) -> &'static str {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return FALLBACK_CATEGORY;
    }

    TAXONOMY
        .iter()
        .find(|(_, stems)| stems.iter().any(|stem| stem_matches(&name, stem)))
        .map(|(label, _)| *label)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Bidirectional substring test on lower-cased input
fn stem_matches(name: &str, stem: &str) -> bool {
    name.contains(stem) || stem.contains(name)
}

/// One category and the stems that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub stems: Vec<String>,
}

/// Categorizer over an owned, ordered taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Categorizer {
    /// Build from a custom taxonomy. Stems are lower-cased and blank stems
    /// dropped; rule order is kept as given.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                label: rule.label,
                stems: rule
                    .stems
                    .into_iter()
                    .map(|stem| stem.trim().to_lowercase())
                    .filter(|stem| !stem.is_empty())
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// The builtin taxonomy as an owned categorizer
    pub fn builtin() -> Self {
        Self::new(
            TAXONOMY
                .iter()
                .map(|(label, stems)| CategoryRule {
                    label: label.to_string(),
                    stems: stems.iter().map(|stem| stem.to_string()).collect(),
                })
                .collect(),
        )
    }

    pub fn categorize(&self, name: &str) -> &str {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return FALLBACK_CATEGORY;
        }

        self.rules
            .iter()
            .find(|rule| rule.stems.iter().any(|stem| stem_matches(&name, stem)))
            .map(|rule| rule.label.as_str())
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_items() {
        assert_eq!(categorize("milk"), "Dairy");
        assert_eq!(categorize("whole milk"), "Dairy");
        assert_eq!(categorize("apples"), "Produce");
        assert_eq!(categorize("chicken breast"), "Meat");
        assert_eq!(categorize("bread"), "Bakery");
        assert_eq!(categorize("rice"), "Pantry");
        assert_eq!(categorize("orange juice"), "Beverages");
        assert_eq!(categorize("potato chips"), "Produce");
        assert_eq!(categorize("tortilla chips"), "Bakery");
        assert_eq!(categorize("chips"), "Snacks");
        assert_eq!(categorize("dish soap"), "Household");
        assert_eq!(categorize("frozen peas"), "Frozen");
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        assert_eq!(categorize("  MILK "), "Dairy");
        assert_eq!(categorize("Orange Juice"), "Beverages");
    }

    #[test]
    fn test_stem_containing_name_matches() {
        // "orange" is contained by the Produce stem "oranges"
        assert_eq!(categorize("orange"), "Produce");
        assert_eq!(categorize("choc"), "Snacks");
    }

    #[test]
    fn test_declaration_order_beats_specificity() {
        // "cream" (Dairy) is checked before "ice cream" (Frozen)
        assert_eq!(categorize("ice cream"), "Dairy");
        // "steak" sits in Meat, ahead of the Beverages stem "tea"
        assert_eq!(categorize("steak"), "Meat");
    }

    #[test]
    fn test_short_names_hit_first_containing_stem() {
        assert_eq!(categorize("a"), "Dairy");
        assert_eq!(categorize("e"), "Dairy");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(categorize("asdfghjkl"), FALLBACK_CATEGORY);
        assert_eq!(categorize("batteries"), FALLBACK_CATEGORY);
        assert_eq!(categorize(""), FALLBACK_CATEGORY);
        assert_eq!(categorize("   "), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_idempotent() {
        for name in ["milk", "orange juice", "batteries", "a"] {
            assert_eq!(categorize(name), categorize(name));
        }
    }

    #[test]
    fn test_builtin_categorizer_agrees_with_free_function() {
        let categorizer = Categorizer::builtin();
        for name in ["milk", "apples", "steak", "shampoo", "pizza", "batteries", "a", ""] {
            assert_eq!(categorizer.categorize(name), categorize(name), "name {:?}", name);
        }
    }

    #[test]
    fn test_custom_taxonomy() {
        let categorizer = Categorizer::new(vec![
            CategoryRule {
                label: "Pets".to_string(),
                stems: vec!["Dog Food".to_string(), "  ".to_string(), "litter".to_string()],
            },
            CategoryRule {
                label: "Dairy".to_string(),
                stems: vec!["milk".to_string()],
            },
        ]);
        assert_eq!(categorizer.categorize("dog food"), "Pets");
        assert_eq!(categorizer.categorize("Cat Litter"), "Pets");
        assert_eq!(categorizer.categorize("milk"), "Dairy");
        assert_eq!(categorizer.categorize("bread"), FALLBACK_CATEGORY);
        // blank stems were dropped, so a blank name cannot match them
        assert_eq!(categorizer.categorize("x"), FALLBACK_CATEGORY);
    }
}
