//! Dialogue agent: the per-session summarization conversation
//!
//! This module provides:
//! - `DialogueMode`, the three conversation states
//! - `DialogueSettings`, the thresholds and lengths the agent works with
//! - `DialogueAgent`, the state machine driving one conversation
//! - text helpers for word counting, sentence completion and reply formatting

mod agent;
pub mod greeting;
pub mod replies;
pub mod text;

use std::fmt;

pub use agent::DialogueAgent;
pub use greeting::is_greeting;

/// Conversation state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueMode {
    #[default]
    Idle,
    AwaitingLength,
    AwaitingResummarizeChoice,
}

impl fmt::Display for DialogueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogueMode::Idle => "idle",
            DialogueMode::AwaitingLength => "awaiting_length",
            DialogueMode::AwaitingResummarizeChoice => "awaiting_resummarize_choice",
        };
        f.write_str(s)
    }
}

/// Limits applied by every agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSettings {
    /// Messages must have strictly more words than this to be summarized
    pub min_words_exclusive: usize,
    /// Smallest accepted summary length
    pub min_length: u32,
    /// Largest accepted summary length
    pub max_length: u32,
    /// Lower bound passed to the summarizer on every call
    pub summary_min_length: u32,
    /// Upper bound used when re-summarizing a summary
    pub resummarize_max_length: u32,
    pub max_articles: usize,
    /// Words taken from the summary for the narrower article query
    pub fallback_keywords: usize,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            min_words_exclusive: 10,
            min_length: 10,
            max_length: 500,
            summary_min_length: 20,
            resummarize_max_length: 100,
            max_articles: 5,
            fallback_keywords: 3,
        }
    }
}
