//! Wikipedia article lookup
//!
//! Searches through the MediaWiki Action API, then resolves each candidate
//! title to its canonical page URL. Missing and disambiguation pages are
//! skipped one by one.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::articles::{ArticleLookup, ArticleRef};
use crate::config::ArticlesConfig;
use crate::{Result, SummeryError};

/// `list=search` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

/// `prop=info|pageprops` response (formatversion=2)
#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    query: Option<PageQuery>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    fullurl: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

/// Why a single candidate was dropped
#[derive(Debug, PartialEq, Eq)]
enum Skip {
    Missing,
    Disambiguation,
    NoUrl,
}

impl PageInfo {
    fn into_article(self) -> std::result::Result<ArticleRef, Skip> {
        if self.missing || self.invalid {
            return Err(Skip::Missing);
        }
        if self
            .pageprops
            .as_ref()
            .is_some_and(|p| p.disambiguation.is_some())
        {
            return Err(Skip::Disambiguation);
        }
        match self.fullurl {
            Some(url) if !url.is_empty() => Ok(ArticleRef::new(self.title, url)),
            _ => Err(Skip::NoUrl),
        }
    }
}

pub struct WikipediaLookup {
    config: ArticlesConfig,
    http_client: reqwest::Client,
}

impl WikipediaLookup {
    pub fn new(config: ArticlesConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| SummeryError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http_client
            .get(&self.config.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| SummeryError::Http(format!("Wikipedia request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SummeryError::Http(format!(
                "Wikipedia returned status: {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SummeryError::Http(format!("Failed to parse Wikipedia response: {}", e)))
    }

    async fn search_titles(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let limit = limit.to_string();
        let resp: SearchResponse = self
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("srprop", ""),
                ("format", "json"),
            ])
            .await?;
        Ok(resp
            .query
            .map(|q| q.search.into_iter().map(|h| h.title).collect())
            .unwrap_or_default())
    }

    async fn resolve_page(&self, title: &str) -> Result<Option<PageInfo>> {
        let resp: PageResponse = self
            .get_json(&[
                ("action", "query"),
                ("prop", "info|pageprops"),
                ("inprop", "url"),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;
        Ok(resp.query.and_then(|q| q.pages.into_iter().next()))
    }
}

#[async_trait]
impl ArticleLookup for WikipediaLookup {
    async fn search_related(&self, query: &str, max_results: usize) -> Vec<ArticleRef> {
        let query = query.trim();
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }
        debug!(target: "wikipedia", query = %query, max_results, "Searching related articles");

        let titles = match self.search_titles(query, max_results).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!(target: "wikipedia", error = %e, "Search failed; no related articles");
                return Vec::new();
            }
        };

        let mut articles = Vec::with_capacity(titles.len());
        for title in titles {
            match self.resolve_page(&title).await {
                Ok(Some(page)) => match page.into_article() {
                    Ok(article) => articles.push(article),
                    Err(reason) => {
                        debug!(target: "wikipedia", title = %title, ?reason, "Skipping candidate")
                    }
                },
                Ok(None) => debug!(target: "wikipedia", title = %title, "Candidate not returned"),
                Err(e) => {
                    warn!(target: "wikipedia", title = %title, error = %e, "Failed to resolve candidate")
                }
            }
        }
        articles
    }
}
