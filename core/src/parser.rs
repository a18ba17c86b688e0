//! Transcript → [`Intent`] parsing.
//!
//! Commands are matched against a single ordered table of rules. Each rule
//! pairs a matcher with the builder that turns its captured item phrase into
//! an intent. Add rules come first, then remove rules, then search rules, and
//! the first rule that matches is authoritative even if a later rule would
//! also have matched. Changing the table order changes observable behavior.

use regex::Regex;
use tracing::debug;

use crate::categorizer::Categorizer;
use crate::errors::{AssistantError, AssistantResult};
use crate::extractor::ItemExtractor;
use crate::types::Intent;

type Builder = fn(&CommandParser, &str) -> AssistantResult<Intent>;

/// Static description of one rule; compiled into a [`CommandRule`].
struct RuleDef {
    label: &'static str,
    pattern: &'static str,
    build: Builder,
}

/// "(my|the) (shopping|grocery) list|cart" with an optional determiner
const LIST: &str = r"(?:my\s+|the\s+)?(?:shopping\s+|grocery\s+)?(?:list|cart)";

/// Same, with a required determiner, for trailing-only forms
const OWNED_LIST: &str = r"(?:my|the)\s+(?:shopping\s+|grocery\s+)?(?:list|cart)";

const ADD_VERBS: &str = r"add|put|i\s+(?:need|want)(?:\s+to\s+(?:buy|get))?|get\s+me|buy|purchase";

const REMOVE_VERBS: &str = r"remove|delete|take\s+off|cross\s+off";

const SEARCH_VERBS: &str = r"search\s+for|search|find\s+me|find|look\s+for|show\s+me";

/// Rule table in evaluation order. `{LIST}`-style placeholders are expanded
/// when the parser is built.
const RULES: &[RuleDef] = &[
    RuleDef {
        label: "add.verb",
        pattern: r"^(?:{ADD})\b\s*(?P<item>.*?)\s*(?:\b(?:to|on|onto|in|into)\s+{LIST})?$",
        build: CommandParser::build_add,
    },
    RuleDef {
        label: "add.to_list",
        pattern: r"^(?P<item>.*?)\s*\b(?:to|onto)\s+(?:my|the)\s+(?:shopping\s+|grocery\s+)?(?:list|cart|shopping)$",
        build: CommandParser::build_add,
    },
    RuleDef {
        label: "remove.verb",
        pattern: r"^(?:{REMOVE})\b\s*(?P<item>.*?)\s*(?:\b(?:from|off)\s+{LIST})?$",
        build: CommandParser::build_remove,
    },
    RuleDef {
        label: "remove.take_off",
        pattern: r"^(?:take|cross)\s+(?P<item>.+?)\s+off\s+{OWNED_LIST}$",
        build: CommandParser::build_remove,
    },
    RuleDef {
        label: "remove.off_list",
        pattern: r"^(?P<item>.*?)\s*\boff\s+{OWNED_LIST}$",
        build: CommandParser::build_remove,
    },
    RuleDef {
        label: "search.verb",
        pattern: r"^(?:{SEARCH})\b\s*(?P<item>.*?)\s*(?:\b(?:in|on)\s+{LIST})?$",
        build: CommandParser::build_search,
    },
];

/// A compiled matcher and the builder for what it captures
#[derive(Clone)]
struct CommandRule {
    label: &'static str,
    matcher: Regex,
    build: Builder,
}

impl std::fmt::Debug for CommandRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRule")
            .field("label", &self.label)
            .field("matcher", &self.matcher.as_str())
            .finish_non_exhaustive()
    }
}

/// Parses free-form shopping commands.
///
/// Holds no per-call state; one parser can serve any number of commands.
#[derive(Debug, Clone)]
pub struct CommandParser {
    rules: Vec<CommandRule>,
    extractor: ItemExtractor,
    categorizer: Categorizer,
}

impl CommandParser {
    /// Parser with the builtin taxonomy
    pub fn new() -> AssistantResult<Self> {
        Self::with_categorizer(Categorizer::builtin())
    }

    pub fn with_categorizer(categorizer: Categorizer) -> AssistantResult<Self> {
        let rules = RULES
            .iter()
            .map(|def| {
                let pattern = def
                    .pattern
                    .replace("{ADD}", ADD_VERBS)
                    .replace("{REMOVE}", REMOVE_VERBS)
                    .replace("{SEARCH}", SEARCH_VERBS)
                    .replace("{OWNED_LIST}", OWNED_LIST)
                    .replace("{LIST}", LIST);
                Ok(CommandRule {
                    label: def.label,
                    matcher: Regex::new(&format!("(?i){}", pattern))?,
                    build: def.build,
                })
            })
            .collect::<AssistantResult<Vec<_>>>()?;

        Ok(Self {
            rules,
            extractor: ItemExtractor::new()?,
            categorizer,
        })
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Parse a transcript, or `None` when it is not a command we understand.
    pub fn parse(&self, transcript: &str) -> Option<Intent> {
        self.try_parse(transcript).ok()
    }

    /// Like [`parse`](Self::parse) but says why parsing failed:
    /// `ParseFailure` when no rule matched, `ExtractionFailure` when a rule
    /// matched but left no item name.
    pub fn try_parse(&self, transcript: &str) -> AssistantResult<Intent> {
        let command = normalize(transcript);
        if command.is_empty() {
            return Err(AssistantError::ParseFailure(transcript.trim().to_string()));
        }

        for rule in &self.rules {
            if let Some(caps) = rule.matcher.captures(&command) {
                let phrase = caps.name("item").map(|m| m.as_str()).unwrap_or_default();
                debug!(rule = rule.label, phrase = phrase, "Command rule matched");
                return (rule.build)(self, phrase);
            }
        }

        debug!(command = %command, "No command rule matched");
        Err(AssistantError::ParseFailure(command))
    }

    /// Label of the rule that would handle this transcript
    pub fn matched_rule(&self, transcript: &str) -> Option<&'static str> {
        let command = normalize(transcript);
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(&command))
            .map(|rule| rule.label)
    }

    fn build_add(&self, phrase: &str) -> AssistantResult<Intent> {
        let item = self.extractor.extract(phrase)?;
        let category = self.categorizer.categorize(&item.name).to_string();
        Ok(Intent::Add {
            name: item.name,
            quantity: item.quantity,
            category,
        })
    }

    fn build_remove(&self, phrase: &str) -> AssistantResult<Intent> {
        Ok(Intent::Remove {
            name: required(phrase)?,
        })
    }

    fn build_search(&self, phrase: &str) -> AssistantResult<Intent> {
        Ok(Intent::Search {
            query: required(phrase)?,
        })
    }
}

fn required(phrase: &str) -> AssistantResult<String> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return Err(AssistantError::ExtractionFailure(phrase.to_string()));
    }
    Ok(phrase.to_string())
}

/// Collapse whitespace, drop sentence punctuation a recognizer may append,
/// and drop a leading or trailing "please". Case is left alone.
pub fn normalize(transcript: &str) -> String {
    let collapsed = transcript.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut command = collapsed
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?' | ',') || c.is_whitespace())
        .to_string();

    if let Some(rest) = strip_prefix_ignore_case(&command, "please ") {
        command = rest.to_string();
    }
    for suffix in [", please", " please"] {
        if let Some(rest) = strip_suffix_ignore_case(&command, suffix) {
            command = rest.to_string();
            break;
        }
    }

    command.trim().to_string()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let start = text.len().checked_sub(suffix.len())?;
    let tail = text.get(start..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &text[..start])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommandParser {
        CommandParser::new().unwrap()
    }

    fn add(name: &str, quantity: u32, category: &str) -> Intent {
        Intent::Add {
            name: name.to_string(),
            quantity,
            category: category.to_string(),
        }
    }

    fn remove(name: &str) -> Intent {
        Intent::Remove {
            name: name.to_string(),
        }
    }

    fn search(query: &str) -> Intent {
        Intent::Search {
            query: query.to_string(),
        }
    }

    #[test]
    fn test_add_to_list() {
        assert_eq!(parser().parse("add milk to my list"), Some(add("milk", 1, "Dairy")));
    }

    #[test]
    fn test_remove_from_list() {
        assert_eq!(parser().parse("remove bread from my list"), Some(remove("bread")));
    }

    #[test]
    fn test_find() {
        assert_eq!(parser().parse("find chicken"), Some(search("chicken")));
    }

    #[test]
    fn test_add_with_quantity_and_unit() {
        assert_eq!(
            parser().parse("add 2 bottles of orange juice"),
            Some(add("orange juice", 2, "Beverages"))
        );
    }

    #[test]
    fn test_gibberish_is_not_a_command() {
        let parser = parser();
        assert_eq!(parser.parse("asdfghjkl"), None);
        assert!(matches!(
            parser.try_parse("asdfghjkl"),
            Err(AssistantError::ParseFailure(_))
        ));
        // a bare item phrase has no action
        assert_eq!(parser.parse("2 bottles of orange juice"), None);
    }

    #[test]
    fn test_empty_transcript() {
        let parser = parser();
        assert_eq!(parser.parse(""), None);
        assert!(matches!(parser.try_parse("   "), Err(AssistantError::ParseFailure(_))));
    }

    #[test]
    fn test_add_verbs() {
        let parser = parser();
        assert_eq!(parser.parse("add eggs"), Some(add("eggs", 1, "Dairy")));
        assert_eq!(parser.parse("put two cans of soup on the list"), Some(add("soup", 2, "Pantry")));
        assert_eq!(parser.parse("I need to buy eggs"), Some(add("eggs", 1, "Dairy")));
        assert_eq!(parser.parse("i want cheese"), Some(add("cheese", 1, "Dairy")));
        assert_eq!(parser.parse("get me a loaf of bread"), Some(add("bread", 1, "Bakery")));
        assert_eq!(parser.parse("buy 6 bananas"), Some(add("bananas", 6, "Produce")));
        assert_eq!(parser.parse("purchase batteries"), Some(add("batteries", 1, "Other")));
        assert_eq!(
            parser.parse("add three apples to my shopping list"),
            Some(add("apples", 3, "Produce"))
        );
    }

    #[test]
    fn test_add_without_verb() {
        let parser = parser();
        assert_eq!(parser.parse("milk to my shopping list"), Some(add("milk", 1, "Dairy")));
        assert_eq!(parser.parse("coffee to my cart"), Some(add("coffee", 1, "Beverages")));
        assert_eq!(parser.parse("rice to my shopping"), Some(add("rice", 1, "Pantry")));
        assert_eq!(parser.matched_rule("coffee to my cart"), Some("add.to_list"));
    }

    #[test]
    fn test_item_words_that_start_like_suffixes() {
        let parser = parser();
        assert_eq!(parser.parse("add onions"), Some(add("onions", 1, "Produce")));
        assert_eq!(parser.parse("add tomatoes to my list"), Some(add("tomatoes", 1, "Produce")));
    }

    #[test]
    fn test_verbs_need_word_boundary() {
        let parser = parser();
        // "address book" must not be read as "add ress book"
        assert_eq!(parser.parse("address book"), None);
        assert_eq!(parser.parse("finder"), None);
    }

    #[test]
    fn test_remove_forms() {
        let parser = parser();
        assert_eq!(parser.parse("delete cheese"), Some(remove("cheese")));
        assert_eq!(parser.parse("take off the eggs"), Some(remove("the eggs")));
        assert_eq!(parser.parse("cross off eggs from the list"), Some(remove("eggs")));
        assert_eq!(parser.parse("take milk off my list"), Some(remove("milk")));
        assert_eq!(parser.parse("cross bread off the cart"), Some(remove("bread")));
        assert_eq!(parser.parse("bananas off my list"), Some(remove("bananas")));
        assert_eq!(parser.matched_rule("take milk off my list"), Some("remove.take_off"));
        assert_eq!(parser.matched_rule("bananas off my list"), Some("remove.off_list"));
    }

    #[test]
    fn test_remove_keeps_quantity_words() {
        // removal matches by name only, so no extraction happens
        assert_eq!(parser().parse("remove 2 apples"), Some(remove("2 apples")));
    }

    #[test]
    fn test_search_forms() {
        let parser = parser();
        assert_eq!(parser.parse("search for pasta"), Some(search("pasta")));
        assert_eq!(parser.parse("search cereal"), Some(search("cereal")));
        assert_eq!(parser.parse("look for rice in my list"), Some(search("rice")));
        assert_eq!(parser.parse("show me snacks"), Some(search("snacks")));
        assert_eq!(parser.parse("find me some coffee"), Some(search("some coffee")));
    }

    #[test]
    fn test_verb_rule_wins_over_trailing_list_rule() {
        // Both add rules match; the verb rule is first so the verb is not
        // swallowed into the item name.
        let parser = parser();
        assert_eq!(parser.matched_rule("add milk to my list"), Some("add.verb"));
        assert_eq!(parser.parse("add milk to my list"), Some(add("milk", 1, "Dairy")));
    }

    #[test]
    fn test_add_family_is_checked_before_remove() {
        // "remove ..." also fits the verb-less add rule, which is checked first
        let parser = parser();
        assert_eq!(parser.matched_rule("remove eggs to my cart"), Some("add.to_list"));
        assert_eq!(
            parser.parse("remove eggs to my cart"),
            Some(add("remove eggs", 1, "Dairy"))
        );
    }

    #[test]
    fn test_add_family_is_checked_before_search() {
        let parser = parser();
        assert_eq!(
            parser.parse("search for chips to my list"),
            Some(add("search for chips", 1, "Snacks"))
        );
    }

    #[test]
    fn test_matched_rule_without_item_is_extraction_failure() {
        let parser = parser();
        for text in ["add to my list", "add", "remove", "find", "to my list"] {
            assert!(
                matches!(parser.try_parse(text), Err(AssistantError::ExtractionFailure(_))),
                "text {:?}",
                text
            );
            assert_eq!(parser.parse(text), None);
        }
    }

    #[test]
    fn test_case_is_preserved_for_display() {
        assert_eq!(
            parser().parse("Add Whole Milk to my list."),
            Some(add("Whole Milk", 1, "Dairy"))
        );
        assert_eq!(parser().parse("FIND Chicken"), Some(search("Chicken")));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize("  add   milk  "), "add milk");
        assert_eq!(normalize("Add milk to my list."), "Add milk to my list");
        assert_eq!(normalize("please add milk"), "add milk");
        assert_eq!(normalize("Please add milk, please!"), "add milk");
        assert_eq!(normalize("?!"), "");
        assert_eq!(
            parser().parse("Please put three apples on my list!"),
            Some(add("apples", 3, "Produce"))
        );
    }

    #[test]
    fn test_custom_categorizer_flows_into_intents() {
        use crate::categorizer::CategoryRule;

        let parser = CommandParser::with_categorizer(Categorizer::new(vec![CategoryRule {
            label: "Pets".to_string(),
            stems: vec!["kibble".to_string()],
        }]))
        .unwrap();
        assert_eq!(parser.parse("buy kibble"), Some(add("kibble", 1, "Pets")));
        assert_eq!(parser.parse("buy milk"), Some(add("milk", 1, "Other")));
    }
}
