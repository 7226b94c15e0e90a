use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Greeting vocabulary, matched as whole words regardless of case
pub const GREETING_KEYWORDS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "howdy",
    "what's up",
    "salutations",
    "yo",
];

static GREETING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = GREETING_KEYWORDS
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\b({alternation})\b"))
        .case_insensitive(true)
        .build()
        .expect("greeting keywords form a valid pattern")
});

/// True when any greeting keyword appears as a whole word
pub fn is_greeting(message: &str) -> bool {
    GREETING_PATTERN.is_match(message)
}
