//! Request boundary: validates one chat turn and dispatches it to the session's agent

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dialogue::replies;
use crate::registry::SessionRegistry;

/// One user turn as received from the chat page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, alias = "sessionId", alias = "session_id")]
    pub uid: String,
    #[serde(default)]
    pub message: String,
}

/// Reply handed back to the chat page
///
/// Field names are the ones the browser page reads (`response`, `uid`). The
/// request side also accepts `sessionId` for clients that name the session
/// that way, but replies always use these two names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub uid: String,
}

impl ChatRequest {
    pub fn new(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    registry: Arc<SessionRegistry>,
}

impl ChatService {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Handle one turn. Never fails: every problem becomes a reply.
    pub async fn handle(&self, req: ChatRequest) -> ChatResponse {
        let uid = req.uid.trim();
        let message = req.message.trim();

        if uid.is_empty() {
            debug!(target: "boundary", "Rejecting request without uid");
            return ChatResponse {
                response: replies::MISSING_UID.to_string(),
                uid: String::new(),
            };
        }
        if message.is_empty() {
            return ChatResponse {
                response: replies::NOT_UNDERSTOOD.to_string(),
                uid: uid.to_string(),
            };
        }

        let handle = match self.registry.resolve(uid) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(target: "boundary", error = %e, "Failed to resolve session");
                return ChatResponse {
                    response: replies::MISSING_UID.to_string(),
                    uid: String::new(),
                };
            }
        };

        let response = {
            let mut agent = handle.lock().await;
            agent.respond(message).await
        };

        ChatResponse {
            response,
            uid: uid.to_string(),
        }
    }
}
