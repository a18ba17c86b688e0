//! Splits an item phrase into a name and a quantity.

use regex::Regex;

use crate::errors::{AssistantError, AssistantResult};
use crate::quantity::{self, DEFAULT_QUANTITY};

/// Quantity tokens accepted in leading position
const QUANTITY_TOKEN: &str = r"\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten";

/// Container and measure words that may sit between a quantity and "of"
const UNIT_WORDS: &str = r"bottles?|cans?|box(?:es)?|bags?|packs?|packages?|cartons?|jars?|loa(?:f|ves)|pounds?|lbs?|kilos?|kgs?|grams?|dozens?|bunch(?:es)?|pieces?|gallons?|liters?|litres?|heads?|cups?|slices?|sticks?|rolls?|tubs?";

/// A phrase split into item name and count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub name: String,
    pub quantity: u32,
}

/// Ordered quantity patterns. The first pattern that matches decides.
#[derive(Debug, Clone)]
pub struct ItemExtractor {
    patterns: Vec<Regex>,
}

impl ItemExtractor {
    pub fn new() -> AssistantResult<Self> {
        let patterns = vec![
            // "two bottles of milk"
            Regex::new(&format!(
                r"(?i)^(?P<qty>{})\s+(?:{})\s+of\s+(?P<name>.+)$",
                QUANTITY_TOKEN, UNIT_WORDS
            ))?,
            // "3 apples", "a banana"
            Regex::new(&format!(r"(?i)^(?P<qty>{})\s+(?P<name>.+)$", QUANTITY_TOKEN))?,
        ];
        Ok(Self { patterns })
    }

    /// Extract name and quantity from an item phrase.
    ///
    /// Returns `ExtractionFailure` when nothing is left to call the item.
    pub fn extract(&self, phrase: &str) -> AssistantResult<ExtractedItem> {
        let phrase = phrase.trim();

        let (name, quantity) = self
            .patterns
            .iter()
            .find_map(|pattern| pattern.captures(phrase))
            .map(|caps| {
                let quantity = caps
                    .name("qty")
                    .map(|m| quantity::resolve(m.as_str()))
                    .unwrap_or(DEFAULT_QUANTITY);
                let name = caps.name("name").map(|m| m.as_str()).unwrap_or_default();
                (name, quantity)
            })
            .unwrap_or((phrase, DEFAULT_QUANTITY));

        let name = name.trim();
        if name.is_empty() {
            return Err(AssistantError::ExtractionFailure(phrase.to_string()));
        }

        Ok(ExtractedItem {
            name: name.to_string(),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(phrase: &str) -> ExtractedItem {
        ItemExtractor::new().unwrap().extract(phrase).unwrap()
    }

    #[test]
    fn test_quantity_unit_of_item() {
        let item = extract("two bottles of milk");
        assert_eq!(item.name, "milk");
        assert_eq!(item.quantity, 2);

        let item = extract("2 bottles of orange juice");
        assert_eq!(item.name, "orange juice");
        assert_eq!(item.quantity, 2);

        let item = extract("a loaf of bread");
        assert_eq!(item.name, "bread");
        assert_eq!(item.quantity, 1);

        let item = extract("Three Cans of Tomato Soup");
        assert_eq!(item.name, "Tomato Soup");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_leading_quantity() {
        let item = extract("3 apples");
        assert_eq!(item.name, "apples");
        assert_eq!(item.quantity, 3);

        let item = extract("an avocado");
        assert_eq!(item.name, "avocado");
        assert_eq!(item.quantity, 1);

        let item = extract("five bananas");
        assert_eq!(item.name, "bananas");
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn test_unit_pattern_wins_over_leading_quantity() {
        // The leading-quantity pattern alone would name this "bags of rice"
        let item = extract("4 bags of rice");
        assert_eq!(item.name, "rice");
        assert_eq!(item.quantity, 4);
    }

    #[test]
    fn test_no_quantity() {
        let item = extract("  peanut butter ");
        assert_eq!(item.name, "peanut butter");
        assert_eq!(item.quantity, 1);

        // a bare number is the whole phrase, not a quantity with no item
        let item = extract("7");
        assert_eq!(item.name, "7");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_zero_quantity_defaults_to_one() {
        let item = extract("0 eggs");
        assert_eq!(item.name, "eggs");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_quantity_word_must_be_whole_word() {
        // "tennis balls" starts with "ten" but is not a quantity
        let item = extract("tennis balls");
        assert_eq!(item.name, "tennis balls");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_empty_phrase_fails() {
        let extractor = ItemExtractor::new().unwrap();
        assert!(matches!(
            extractor.extract("   "),
            Err(AssistantError::ExtractionFailure(_))
        ));
    }
}
