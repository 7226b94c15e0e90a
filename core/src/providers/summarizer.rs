use async_trait::async_trait;
use thiserror::Error;

/// Why a summarizer could not produce a summary.
///
/// The dialogue agent treats every variant the same way; the distinction only
/// matters for logs.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Summarizer unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Summarizer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse summarizer response: {0}")]
    Parse(String),

    #[error("Summarizer returned an empty summary")]
    EmptySummary,
}

/// Text summarization backend.
///
/// Contract:
/// - Input: source text, a maximum length and a minimum length
/// - Output: non-empty summary text
/// - Error: any backend fault, including an empty result
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, SummarizeError>;
}

/// Reject blank output so callers never mistake it for a summary
pub(crate) fn non_empty(text: String) -> Result<String, SummarizeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SummarizeError::EmptySummary);
    }
    Ok(trimmed.to_string())
}
