use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder title until the first user message names the conversation.
pub const DEFAULT_TITLE: &str = "New conversation";

/// Lightweight persisted record describing a conversation for history
/// listing, distinct from its full message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub title: String,
    pub last_activity: DateTime<Utc>,
}

impl ConversationSummary {
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    /// Refresh recency to now.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}
