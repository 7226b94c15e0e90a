//! Hugging Face Inference API summarizer
//!
//! Runs a hosted summarization pipeline (default `facebook/bart-large-cnn`)
//! with greedy decoding.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::summarizer::{non_empty, SummarizeError, Summarizer};
use crate::config::SummarizerConfig;
use crate::{Result, SummeryError};

#[derive(Debug, Deserialize)]
struct PipelineOutput {
    summary_text: String,
}

#[derive(Clone)]
pub struct HuggingFaceSummarizer {
    http: Client,
    cfg: SummarizerConfig,
}

impl HuggingFaceSummarizer {
    pub fn new(cfg: SummarizerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| SummeryError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> std::result::Result<String, SummarizeError> {
        let url = self.endpoint();
        debug!(target: "summarizer", url = %url, max_length, min_length, "POST summarization pipeline");

        let mut req = self
            .http
            .post(&url)
            .header("content-type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        // The pipeline rejects min_length > max_length
        let body = json!({
            "inputs": text,
            "parameters": {
                "max_length": max_length,
                "min_length": min_length.min(max_length),
                "do_sample": false,
            },
        });

        let resp = req.json(&body).send().await.map_err(|e| {
            warn!(target: "summarizer", error = %e, "Summarization request failed");
            SummarizeError::Request(e.to_string())
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let body = resp.text().await.unwrap_or_default();
            warn!(target: "summarizer", body = %body, "Summarization model unavailable");
            return Err(SummarizeError::Unavailable(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(target: "summarizer", %status, body = %body, "Summarization pipeline error");
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let outputs: Vec<PipelineOutput> = resp
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;
        let first = outputs
            .into_iter()
            .next()
            .ok_or_else(|| SummarizeError::Parse("empty pipeline output".into()))?;
        non_empty(first.summary_text)
    }
}
