//! Shared test collaborators for summery-core integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use summery_core::{
    ArticleLookup, ArticleRef, DialogueAgent, DialogueSettings, SessionRegistry, SummarizeError,
    Summarizer,
};

pub const LONG_TEXT: &str =
    "Please summarize this fifteen word long piece of sample text for testing purposes now";

/// Summarizer that keeps the first `max_length` words of its input
#[derive(Default)]
pub struct TruncatingSummarizer {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub fail: bool,
    /// Artificial latency per call
    pub delay: Option<Duration>,
    pub seen: Mutex<Vec<(String, u32, u32)>>,
}

impl TruncatingSummarizer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for TruncatingSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((text.to_string(), max_length, min_length));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail {
            return Err(SummarizeError::Unavailable("model not loaded".into()));
        }
        Ok(text
            .split_whitespace()
            .take(max_length as usize)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Lookup that answers from a fixed table and records every query
#[derive(Default)]
pub struct TableLookup {
    pub answers: HashMap<String, Vec<ArticleRef>>,
    pub queries: Mutex<Vec<String>>,
}

impl TableLookup {
    pub fn with(query: &str, articles: Vec<ArticleRef>) -> Self {
        let mut answers = HashMap::new();
        answers.insert(query.to_string(), articles);
        Self {
            answers,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleLookup for TableLookup {
    async fn search_related(&self, query: &str, max_results: usize) -> Vec<ArticleRef> {
        self.queries.lock().unwrap().push(query.to_string());
        self.answers
            .get(query)
            .map(|a| a.iter().take(max_results).cloned().collect())
            .unwrap_or_default()
    }
}

pub fn agent_with(summarizer: Arc<TruncatingSummarizer>, lookup: Arc<TableLookup>) -> DialogueAgent {
    DialogueAgent::new(summarizer, lookup, DialogueSettings::default())
}

pub fn registry_with(
    summarizer: Arc<TruncatingSummarizer>,
    lookup: Arc<TableLookup>,
) -> SessionRegistry {
    SessionRegistry::new(summarizer, lookup, DialogueSettings::default())
}
