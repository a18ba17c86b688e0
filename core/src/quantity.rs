//! Quantity token resolution.
//!
//! Spoken quantities arrive either as digits ("3") or as words ("three",
//! "a"). Anything that is not understood counts as a single unit; a bad
//! quantity never fails a command.

/// Number words understood in quantity position, lower-case.
pub const NUMBER_WORDS: &[(&str, u32)] = &[
    ("a", 1),
    ("an", 1),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Quantity used when none is stated or the stated one is unusable.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Resolve a quantity token to a count of at least one.
pub fn resolve(token: &str) -> u32 {
    let token = token.trim();
    let lower = token.to_lowercase();

    if let Some((_, value)) = NUMBER_WORDS.iter().find(|(word, _)| *word == lower) {
        return *value;
    }

    match token.parse::<u32>() {
        Ok(0) | Err(_) => DEFAULT_QUANTITY,
        Ok(value) => value,
    }
}
