use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::dialogue::DialogueSettings;
use crate::{Result, SummeryError};

/// High-level configuration for the Summery service
#[derive(Clone, Debug, Default)]
pub struct SummeryConfig {
    pub server: ServerConfig,
    pub summarizer: SummarizerConfig,
    pub articles: ArticlesConfig,
    pub dialogue: DialogueSettings,
}

/// HTTP listener settings
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which summarization backend to talk to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerBackend {
    /// Hugging Face Inference API summarization pipeline
    #[default]
    #[serde(alias = "hf")]
    HuggingFace,
    /// OpenAI-compatible Chat Completions endpoint
    Chat,
}

/// Summarizer client configuration
#[derive(Clone, Debug)]
pub struct SummarizerConfig {
    pub backend: SummarizerBackend,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
    /// Only used by the chat backend
    pub temperature: f32,
}

/// Related-article lookup configuration
#[derive(Clone, Debug)]
pub struct ArticlesConfig {
    pub api_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse::<T>().ok())
}

impl fmt::Display for SummarizerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarizerBackend::HuggingFace => write!(f, "huggingface"),
            SummarizerBackend::Chat => write!(f, "chat"),
        }
    }
}

impl FromStr for SummarizerBackend {
    type Err = SummeryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(SummarizerBackend::HuggingFace),
            "chat" | "openai" => Ok(SummarizerBackend::Chat),
            other => Err(SummeryError::Config(format!(
                "unknown summarizer backend: {other}"
            ))),
        }
    }
}

impl SummarizerBackend {
    fn default_base_url(self) -> &'static str {
        match self {
            SummarizerBackend::HuggingFace => "https://api-inference.huggingface.co",
            SummarizerBackend::Chat => "http://localhost:8000/v1",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            SummarizerBackend::HuggingFace => "facebook/bart-large-cnn",
            SummarizerBackend::Chat => "qwen2.5-0.5b-instruct",
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env_string("SUMMERY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env_parse("SUMMERY_PORT").unwrap_or(8080),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        let backend = env_parse::<SummarizerBackend>("SUMMARIZER_BACKEND").unwrap_or_default();
        Self::for_backend(backend)
    }
}

impl SummarizerConfig {
    /// Defaults for `backend`, with environment overrides applied
    pub fn for_backend(backend: SummarizerBackend) -> Self {
        Self {
            backend,
            base_url: env_string("SUMMARIZER_BASE_URL")
                .unwrap_or_else(|| backend.default_base_url().to_string()),
            model: env_string("SUMMARIZER_MODEL")
                .unwrap_or_else(|| backend.default_model().to_string()),
            api_key: env_string("SUMMARIZER_API_KEY"),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(60_000),
            temperature: env_parse("SUMMARIZER_TEMPERATURE").unwrap_or(0.2),
        }
    }
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            api_url: env_string("WIKIPEDIA_API_URL")
                .unwrap_or_else(|| "https://en.wikipedia.org/w/api.php".to_string()),
            timeout_ms: env_parse("WIKIPEDIA_TIMEOUT_MS").unwrap_or(10_000),
            user_agent: env_string("WIKIPEDIA_USER_AGENT")
                .unwrap_or_else(|| "summery-bot/0.1".to_string()),
        }
    }
}

impl SummeryConfig {
    /// Load configuration from a TOML file (path via SUMMERY_CONFIG or ./summery.toml),
    /// overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path = std::env::var("SUMMERY_CONFIG").unwrap_or_else(|_| "summery.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target = "config", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match Self::from_toml_file(p) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(target = "config", path = %path, error = %e, "Failed to load TOML; using defaults");
                default
            }
        }
    }

    /// Read and parse a TOML file, overlaying it onto the defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Parse a TOML document and overlay it onto the defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let t: SummeryToml =
            toml::from_str(s).map_err(|e| SummeryError::Config(e.to_string()))?;
        Ok(t.overlay(Self::default()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ---------- TOML overlay ----------

#[derive(Debug, Default, Deserialize)]
struct SummeryToml {
    server: Option<ServerToml>,
    summarizer: Option<SummarizerToml>,
    articles: Option<ArticlesToml>,
    dialogue: Option<DialogueToml>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerToml {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct SummarizerToml {
    backend: Option<SummarizerBackend>,
    base_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    request_timeout_ms: Option<u64>,
    temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticlesToml {
    api_url: Option<String>,
    timeout_ms: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DialogueToml {
    resummarize_max_length: Option<u32>,
    summary_min_length: Option<u32>,
    max_articles: Option<usize>,
}

impl SummeryToml {
    fn overlay(self, mut base: SummeryConfig) -> SummeryConfig {
        if let Some(s) = self.server {
            if let Some(v) = s.host {
                base.server.host = v;
            }
            if let Some(v) = s.port {
                base.server.port = v;
            }
        }
        if let Some(s) = self.summarizer {
            // Switching backend resets endpoint defaults before field overrides apply
            if let Some(b) = s.backend {
                if b != base.summarizer.backend {
                    base.summarizer = SummarizerConfig::for_backend(b);
                }
            }
            if let Some(v) = s.base_url {
                base.summarizer.base_url = v;
            }
            if let Some(v) = s.model {
                base.summarizer.model = v;
            }
            if let Some(v) = s.api_key.filter(|k| !k.is_empty()) {
                base.summarizer.api_key = Some(v);
            }
            if let Some(v) = s.request_timeout_ms {
                base.summarizer.request_timeout_ms = v;
            }
            if let Some(v) = s.temperature {
                base.summarizer.temperature = v;
            }
        }
        if let Some(a) = self.articles {
            if let Some(v) = a.api_url {
                base.articles.api_url = v;
            }
            if let Some(v) = a.timeout_ms {
                base.articles.timeout_ms = v;
            }
            if let Some(v) = a.user_agent {
                base.articles.user_agent = v;
            }
        }
        if let Some(d) = self.dialogue {
            if let Some(v) = d.resummarize_max_length {
                base.dialogue.resummarize_max_length = v;
            }
            if let Some(v) = d.summary_min_length {
                base.dialogue.summary_min_length = v;
            }
            if let Some(v) = d.max_articles {
                base.dialogue.max_articles = v;
            }
        }
        base
    }
}
