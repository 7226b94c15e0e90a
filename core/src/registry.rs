use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;

use crate::dialogue::{DialogueAgent, DialogueMode, DialogueSettings};
use crate::providers::{ArticleLookup, Summarizer};
use crate::{Result, SummeryError};

/// Shared handle to one session's agent.
///
/// Hold the lock for a whole turn: messages for one session are processed one
/// at a time, while distinct sessions never contend.
pub type AgentHandle = Arc<Mutex<DialogueAgent>>;

/// In-memory map of session id -> dialogue agent. Grows without eviction.
pub struct SessionRegistry {
    agents: DashMap<String, AgentHandle>,
    summarizer: Arc<dyn Summarizer>,
    lookup: Arc<dyn ArticleLookup>,
    settings: DialogueSettings,
}

impl SessionRegistry {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        lookup: Arc<dyn ArticleLookup>,
        settings: DialogueSettings,
    ) -> Self {
        Self {
            agents: DashMap::new(),
            summarizer,
            lookup,
            settings,
        }
    }

    /// Fetch the agent for `session_id`, creating it on first contact.
    ///
    /// Creation happens under the map's shard lock, so concurrent first
    /// resolutions of one id all observe the same agent.
    pub fn resolve(&self, session_id: &str) -> Result<AgentHandle> {
        if session_id.trim().is_empty() {
            return Err(SummeryError::MissingIdentifier);
        }
        if let Some(existing) = self.agents.get(session_id) {
            return Ok(existing.clone());
        }
        let handle = self
            .agents
            .entry(session_id.to_string())
            .or_insert_with(|| {
                info!(target: "registry", session_id = %session_id, "Creating dialogue agent");
                Arc::new(Mutex::new(DialogueAgent::new(
                    self.summarizer.clone(),
                    self.lookup.clone(),
                    self.settings.clone(),
                )))
            })
            .clone();
        Ok(handle)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.agents.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Current mode of a session, waiting for any in-flight turn to finish
    pub async fn mode_of(&self, session_id: &str) -> Option<DialogueMode> {
        let handle = self.agents.get(session_id).map(|e| e.clone())?;
        let agent = handle.lock().await;
        Some(agent.mode())
    }
}
