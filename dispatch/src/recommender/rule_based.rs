use std::collections::VecDeque;
use std::fmt;
use std::sync::RwLock;

use async_trait::async_trait;
use cartvoice_core::{categorize, ListItem, Suggestion, SuggestionKind};
use chrono::{Datelike, Local};
use tracing::debug;

use super::{Recommender, RecommenderError};

/// Most suggestions returned from one call
pub const MAX_SUGGESTIONS: usize = 6;

/// How many added items are remembered
pub const HISTORY_LIMIT: usize = 100;

const COMPLEMENTS: &[(&str, &[&str])] = &[
    ("milk", &["cereal", "cookies", "coffee"]),
    ("bread", &["butter", "jam", "lunch meat"]),
    ("pasta", &["pasta sauce", "parmesan cheese", "garlic"]),
    ("chicken", &["vegetables", "rice", "seasoning"]),
];

const SUBSTITUTES: &[(&str, &[&str])] = &[
    ("milk", &["almond milk", "soy milk"]),
    ("butter", &["margarine", "olive oil"]),
    ("eggs", &["flax eggs", "applesauce"]),
];

const ESSENTIALS: &[&str] = &["toilet paper", "paper towels", "dish soap", "laundry detergent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Season for a calendar month, 1 = January
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn current() -> Self {
        Self::from_month(Local::now().month())
    }

    pub fn produce(&self) -> &'static [&'static str] {
        match self {
            Season::Spring => &["asparagus", "strawberries", "peas"],
            Season::Summer => &["tomatoes", "corn", "watermelon"],
            Season::Fall => &["pumpkins", "apples", "squash"],
            Season::Winter => &["citrus fruits", "root vegetables", "cabbage"],
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Fall => write!(f, "fall"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

fn suggestion(name: &str, reason: String, kind: SuggestionKind, priority: u8) -> Suggestion {
    Suggestion {
        name: name.to_string(),
        reason,
        kind,
        priority,
        category: categorize(name).to_string(),
    }
}

/// Suggestions built from fixed item tables plus what the user has added before.
#[derive(Debug, Default)]
pub struct RuleBasedRecommender {
    /// Lower-cased names of added items, oldest first
    history: RwLock<VecDeque<String>>,
}

impl RuleBasedRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    fn history_snapshot(&self) -> Result<Vec<String>, RecommenderError> {
        let history = self.history.read().map_err(|e| {
            RecommenderError::Failed(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(history.iter().cloned().collect())
    }

    /// Suggestions for the given list during the given season
    pub fn suggest_for_season(
        &self,
        current: &[ListItem],
        season: Season,
    ) -> Result<Vec<Suggestion>, RecommenderError> {
        let current_names: Vec<String> = current.iter().map(|i| i.name.to_lowercase()).collect();
        let history = self.history_snapshot()?;

        let mut all = complementary(&current_names);
        all.extend(seasonal(season));
        all.extend(frequent(&history, &current_names));
        all.extend(essentials(&current_names));

        let suggestions = dedupe(all);
        debug!(count = suggestions.len(), season = %season, "Built rule-based suggestions");
        Ok(suggestions)
    }
}

fn complementary(current_names: &[String]) -> Vec<Suggestion> {
    let mut found = Vec::new();
    for name in current_names {
        for (key, complements) in COMPLEMENTS {
            if !name.contains(key) {
                continue;
            }
            for complement in complements.iter() {
                if !current_names.iter().any(|n| n == complement) {
                    found.push(suggestion(
                        complement,
                        format!("Goes well with {}", key),
                        SuggestionKind::Complementary,
                        2,
                    ));
                }
            }
        }
    }
    found.truncate(3);
    found
}

fn seasonal(season: Season) -> Vec<Suggestion> {
    season
        .produce()
        .iter()
        .take(2)
        .map(|name| {
            suggestion(
                name,
                format!("{} seasonal item", season),
                SuggestionKind::Seasonal,
                3,
            )
        })
        .collect()
}

fn frequent(history: &[String], current_names: &[String]) -> Vec<Suggestion> {
    // first-seen order breaks ties
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for name in history {
        match counts.iter_mut().find(|(n, _)| *n == name.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((name.as_str(), 1)),
        }
    }
    counts.retain(|(name, count)| *count >= 2 && !current_names.iter().any(|n| n == name));
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(2)
        .map(|(name, count)| {
            suggestion(
                name,
                format!("Frequently purchased ({} times)", count),
                SuggestionKind::Frequent,
                2,
            )
        })
        .collect()
}

fn essentials(current_names: &[String]) -> Vec<Suggestion> {
    ESSENTIALS
        .iter()
        .filter(|item| !current_names.iter().any(|n| n == *item))
        .take(2)
        .map(|item| {
            suggestion(
                item,
                "Household essential".to_string(),
                SuggestionKind::Essential,
                4,
            )
        })
        .collect()
}

/// Drop case-insensitive duplicates, keeping the first, and cap the result
fn dedupe(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen: Vec<String> = Vec::new();
    let mut unique = Vec::new();
    for s in suggestions {
        let key = s.name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        unique.push(s);
        if unique.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    unique
}

/// Every item name the fixed tables know about
fn catalog() -> impl Iterator<Item = &'static str> {
    let complements = COMPLEMENTS.iter().flat_map(|(_, items)| items.iter().copied());
    let substitutes = SUBSTITUTES.iter().flat_map(|(_, items)| items.iter().copied());
    let seasonal = [Season::Spring, Season::Summer, Season::Fall, Season::Winter]
        .into_iter()
        .flat_map(|season| season.produce().iter().copied());

    complements
        .chain(substitutes)
        .chain(seasonal)
        .chain(ESSENTIALS.iter().copied())
}

#[async_trait]
impl Recommender for RuleBasedRecommender {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, RecommenderError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let history = self.history_snapshot()?;
        let mut matches: Vec<Suggestion> = history
            .iter()
            .rev()
            .filter(|name| name.contains(&needle))
            .map(|name| {
                suggestion(
                    name,
                    "Previously added".to_string(),
                    SuggestionKind::Frequent,
                    2,
                )
            })
            .collect();
        matches.extend(
            catalog()
                .filter(|name| name.contains(&needle))
                .map(|name| suggestion(name, "Suggested item".to_string(), SuggestionKind::Catalog, 3)),
        );

        Ok(dedupe(matches))
    }

    async fn record_history(&self, item: &ListItem) -> Result<(), RecommenderError> {
        let mut history = self.history.write().map_err(|e| {
            RecommenderError::Failed(format!("Failed to acquire write lock: {}", e))
        })?;

        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(item.name.to_lowercase());
        Ok(())
    }

    async fn suggest(&self, current: &[ListItem]) -> Result<Vec<Suggestion>, RecommenderError> {
        self.suggest_for_season(current, Season::current())
    }
}
