use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A related reference article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
}

impl ArticleRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Related-article search.
///
/// Implementations never fail observably: lookup errors degrade to an empty
/// list. Results keep the order the backend ranked them in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleLookup: Send + Sync {
    async fn search_related(&self, query: &str, max_results: usize) -> Vec<ArticleRef>;
}
