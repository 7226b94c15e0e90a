// Summery Core Library
// Conversational summarizer runtime: per-session dialogue agents and their collaborators

pub mod boundary;
pub mod config;
pub mod dialogue;
pub mod providers;
pub mod registry;
pub mod telemetry;

// Export core types
pub use boundary::{ChatRequest, ChatResponse, ChatService};
pub use config::{ArticlesConfig, ServerConfig, SummarizerBackend, SummarizerConfig, SummeryConfig};
pub use dialogue::{DialogueAgent, DialogueMode, DialogueSettings};
pub use providers::{ArticleLookup, ArticleRef, SummarizeError, Summarizer};
pub use registry::{AgentHandle, SessionRegistry};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummeryError {
    #[error("Session identifier is missing")]
    MissingIdentifier,

    #[error("Invalid summary length: {0}")]
    InvalidLengthInput(String),

    #[error("Summary length out of range: {0}")]
    LengthOutOfRange(i64),

    #[error("Summarization failed: {0}")]
    SummarizationFailure(String),

    #[error("No related articles found")]
    LookupDegraded,

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
pub type Result<T> = std::result::Result<T, SummeryError>;
