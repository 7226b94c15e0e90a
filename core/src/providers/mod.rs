/// Collaborator providers: summarization backends and related-article lookup
pub mod articles;
pub mod chat;
pub mod huggingface;
pub mod summarizer;
pub mod wikipedia;

use std::sync::Arc;

pub use articles::{ArticleLookup, ArticleRef};
pub use chat::ChatSummarizer;
pub use huggingface::HuggingFaceSummarizer;
pub use summarizer::{SummarizeError, Summarizer};
pub use wikipedia::WikipediaLookup;

use crate::config::{ArticlesConfig, SummarizerBackend, SummarizerConfig};
use crate::Result;

/// Build the summarizer selected by `cfg.backend`
pub fn build_summarizer(cfg: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    let summarizer: Arc<dyn Summarizer> = match cfg.backend {
        SummarizerBackend::HuggingFace => Arc::new(HuggingFaceSummarizer::new(cfg.clone())?),
        SummarizerBackend::Chat => Arc::new(ChatSummarizer::new(cfg.clone())?),
    };
    tracing::info!(
        target = "summarizer",
        backend = %cfg.backend,
        model = %cfg.model,
        "Summarizer ready"
    );
    Ok(summarizer)
}

/// Build the article lookup service
pub fn build_article_lookup(cfg: &ArticlesConfig) -> Result<Arc<dyn ArticleLookup>> {
    Ok(Arc::new(WikipediaLookup::new(cfg.clone())?))
}
