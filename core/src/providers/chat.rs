//! OpenAI-compatible Chat Completions summarizer
//!
//! Asks an instruction-tuned model for a summary bounded by word counts.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::summarizer::{non_empty, SummarizeError, Summarizer};
use crate::config::SummarizerConfig;
use crate::{Result, SummeryError};

/// Rough upper bound of tokens per English word
const TOKENS_PER_WORD: u32 = 2;

#[derive(Clone)]
pub struct ChatSummarizer {
    http: Client,
    cfg: SummarizerConfig,
}

impl ChatSummarizer {
    pub fn new(cfg: SummarizerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| SummeryError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }
}

fn system_prompt(max_length: u32, min_length: u32) -> String {
    format!(
        "You summarize text. Reply with the summary only, no preamble. \
         Use between {} and {} words.",
        min_length.min(max_length),
        max_length
    )
}

fn extract_text_from_chat_completions(v: &serde_json::Value) -> Option<String> {
    v.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> std::result::Result<String, SummarizeError> {
        let chat_url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        debug!(target: "summarizer", url = %chat_url, max_length, "POST via Chat Completions");

        let mut req = self
            .http
            .post(&chat_url)
            .header("content-type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        let body = json!({
            "model": self.cfg.model,
            "messages": [
                {"role": "system", "content": system_prompt(max_length, min_length)},
                {"role": "user", "content": text},
            ],
            "max_tokens": max_length.saturating_mul(TOKENS_PER_WORD),
            "temperature": self.cfg.temperature,
        });

        let resp = req.json(&body).send().await.map_err(|e| {
            warn!(target: "summarizer", error = %e, "Chat Completions request failed");
            SummarizeError::Request(e.to_string())
        })?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!(target: "summarizer", %status, body = %body, "Chat Completions error");
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let val: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;
        let text = extract_text_from_chat_completions(&val).ok_or_else(|| {
            SummarizeError::Parse("Missing choices[0].message.content in chat completions".into())
        })?;
        non_empty(text)
    }
}
