use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::events::StreamEvent;

/// Lazily-produced, single-pass sequence of decoded stream events.
///
/// Each pull reads at most one further chunk from the underlying response;
/// dropping the stream releases the connection, so a caller that stops
/// pulling early leaks nothing.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, ClientError>> + Send>>;

/// Request body for one chat exchange. Serialized field names match what the
/// backend validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub conversation_id: String,
    pub message: String,
    pub context: ChatContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub user_id: String,
    pub tutor_name: String,
}

/// One entry of remote conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }
}

/// The backend seam the session layer drives.
///
/// `TutorChatClient` is the HTTP implementation; tests substitute scripted
/// fakes.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Start one exchange and stream its decoded events.
    async fn stream(
        &self,
        conversation_id: &str,
        message: &str,
    ) -> Result<EventStream, ClientError>;

    /// Fetch stored history for a conversation. `None` means no history,
    /// which is the expected answer for a new conversation — not an error.
    async fn fetch_history(&self, conversation_id: &str) -> Option<Vec<HistoryEntry>>;

    /// Best-effort request to clear server-side memory for a conversation.
    /// Callers must not depend on this succeeding.
    async fn clear_memory(&self, conversation_id: &str);
}
