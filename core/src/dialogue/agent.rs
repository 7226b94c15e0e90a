use std::num::IntErrorKind;
use std::sync::Arc;

use html_escape::encode_text;
use tracing::{debug, info, warn};

use super::greeting::is_greeting;
use super::replies;
use super::text::{ensure_complete_sentence, fallback_query, format_articles, word_count};
use super::{DialogueMode, DialogueSettings};
use crate::providers::{ArticleLookup, ArticleRef, Summarizer};
use crate::{Result, SummeryError};

/// One conversation's state and behavior.
///
/// The agent consumes one message per `respond` call, moves between
/// `DialogueMode`s and returns the reply text. Every collaborator failure is
/// turned into a reply here; nothing escapes `respond`.
pub struct DialogueAgent {
    mode: DialogueMode,
    /// Set only while awaiting a length
    pending_text: Option<String>,
    last_summary: Option<String>,
    created_at_ms: i64,
    last_update_ms: i64,
    settings: DialogueSettings,
    summarizer: Arc<dyn Summarizer>,
    lookup: Arc<dyn ArticleLookup>,
}

impl DialogueAgent {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        lookup: Arc<dyn ArticleLookup>,
        settings: DialogueSettings,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            mode: DialogueMode::Idle,
            pending_text: None,
            last_summary: None,
            created_at_ms: now,
            last_update_ms: now,
            settings,
            summarizer,
            lookup,
        }
    }

    pub fn mode(&self) -> DialogueMode {
        self.mode
    }

    pub fn pending_text(&self) -> Option<&str> {
        self.pending_text.as_deref()
    }

    pub fn last_summary(&self) -> Option<&str> {
        self.last_summary.as_deref()
    }

    pub fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    pub fn last_update_ms(&self) -> i64 {
        self.last_update_ms
    }

    pub fn settings(&self) -> &DialogueSettings {
        &self.settings
    }

    /// Consume one message and produce the reply
    pub async fn respond(&mut self, message: &str) -> String {
        debug!(target: "dialogue", mode = %self.mode, words = word_count(message), "Handling message");
        let reply = match self.mode {
            DialogueMode::Idle => self.on_idle(message),
            DialogueMode::AwaitingLength => self.on_length(message).await,
            DialogueMode::AwaitingResummarizeChoice => self.on_resummarize_choice(message).await,
        };
        self.last_update_ms = chrono::Utc::now().timestamp_millis();
        reply
    }

    fn transition(&mut self, next: DialogueMode) {
        if self.mode != next {
            info!(target: "dialogue", from = %self.mode, to = %next, "Mode transition");
        }
        self.mode = next;
        if next != DialogueMode::AwaitingLength {
            self.pending_text = None;
        }
    }

    fn on_idle(&mut self, message: &str) -> String {
        if is_greeting(message) {
            return replies::GREETING.to_string();
        }
        if word_count(message) <= self.settings.min_words_exclusive {
            return replies::too_short(self.settings.min_words_exclusive);
        }
        self.pending_text = Some(message.to_string());
        self.transition(DialogueMode::AwaitingLength);
        replies::ASK_LENGTH.to_string()
    }

    async fn on_length(&mut self, message: &str) -> String {
        let length = match self.parse_length(message) {
            Ok(length) => length,
            Err(SummeryError::LengthOutOfRange(n)) => {
                debug!(target: "dialogue", length = n, "Summary length out of range");
                return replies::out_of_range(self.settings.min_length, self.settings.max_length);
            }
            Err(_) => return replies::INVALID_NUMBER.to_string(),
        };

        let Some(text) = self.pending_text.take() else {
            warn!(target: "dialogue", "Awaiting length without pending text");
            self.transition(DialogueMode::Idle);
            return replies::SUMMARIZE_FAILED.to_string();
        };

        match self.summarize(&text, length).await {
            Ok(summary) => {
                let articles = self.articles_block(&summary).await;
                let reply = replies::summary_reply(&encode_text(&summary), &articles);
                self.last_summary = Some(summary);
                self.transition(DialogueMode::AwaitingResummarizeChoice);
                reply
            }
            Err(e) => {
                warn!(target: "dialogue", error = %e, "Summarization failed");
                self.transition(DialogueMode::Idle);
                replies::SUMMARIZE_FAILED.to_string()
            }
        }
    }

    async fn on_resummarize_choice(&mut self, message: &str) -> String {
        if !is_affirmative(message) {
            self.transition(DialogueMode::Idle);
            return replies::CLOSING.to_string();
        }

        let Some(source) = self.last_summary.clone() else {
            warn!(target: "dialogue", "Re-summarize requested without a summary");
            self.transition(DialogueMode::Idle);
            return replies::RESUMMARIZE_FAILED.to_string();
        };

        match self
            .summarize(&source, self.settings.resummarize_max_length)
            .await
        {
            Ok(summary) => {
                let articles = self.articles_block(&summary).await;
                let reply = replies::resummary_reply(&encode_text(&summary), &articles);
                self.last_summary = Some(summary);
                reply
            }
            Err(e) => {
                warn!(target: "dialogue", error = %e, "Re-summarization failed");
                self.transition(DialogueMode::Idle);
                replies::RESUMMARIZE_FAILED.to_string()
            }
        }
    }

    /// Parse a requested summary length and check it against the accepted range
    fn parse_length(&self, input: &str) -> Result<u32> {
        let trimmed = input.trim();
        let n = trimmed.parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow => SummeryError::LengthOutOfRange(i64::MAX),
            IntErrorKind::NegOverflow => SummeryError::LengthOutOfRange(i64::MIN),
            _ => SummeryError::InvalidLengthInput(trimmed.to_string()),
        })?;
        if n < i64::from(self.settings.min_length) || n > i64::from(self.settings.max_length) {
            return Err(SummeryError::LengthOutOfRange(n));
        }
        u32::try_from(n).map_err(|_| SummeryError::LengthOutOfRange(n))
    }

    /// Summarize `text` and normalize the ending punctuation
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String> {
        let summary = self
            .summarizer
            .summarize(text, max_length, self.settings.summary_min_length)
            .await
            .map_err(|e| SummeryError::SummarizationFailure(e.to_string()))?;
        if summary.trim().is_empty() {
            return Err(SummeryError::SummarizationFailure(
                "empty summary".to_string(),
            ));
        }
        Ok(ensure_complete_sentence(&summary))
    }

    /// Articles related to `summary`, retrying once with a narrower query
    async fn related_articles(&self, summary: &str) -> Result<Vec<ArticleRef>> {
        let max = self.settings.max_articles;
        let articles = self.lookup.search_related(summary, max).await;
        if !articles.is_empty() {
            return Ok(articles);
        }

        let narrow = fallback_query(summary, self.settings.fallback_keywords);
        debug!(target: "dialogue", query = %narrow, "No articles for summary; trying narrower query");
        let articles = self.lookup.search_related(&narrow, max).await;
        if articles.is_empty() {
            return Err(SummeryError::LookupDegraded);
        }
        Ok(articles)
    }

    async fn articles_block(&self, summary: &str) -> String {
        match self.related_articles(summary).await {
            Ok(articles) => format_articles(&articles),
            Err(e) => {
                debug!(target: "dialogue", reason = %e, "Related articles degraded");
                format_articles(&[])
            }
        }
    }
}

/// `yes` or `y`, ignoring case and surrounding whitespace
fn is_affirmative(message: &str) -> bool {
    let m = message.trim();
    m.eq_ignore_ascii_case("yes") || m.eq_ignore_ascii_case("y")
}
