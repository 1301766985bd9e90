use tutorchat_client::HistoryEntry;
use uuid::Uuid;

/// One visible entry of the active conversation.
///
/// Committed messages are immutable. While a reply is still streaming the
/// controller exposes a pending copy, which the committed version replaces
/// wholesale — the pending instance is never mutated into the final one.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub is_assistant: bool,
    pub follow_up_suggestions: Option<Vec<String>>,
    pub is_pending: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_assistant: false,
            follow_up_suggestions: None,
            is_pending: false,
        }
    }

    pub fn assistant(content: impl Into<String>, suggestions: Option<Vec<String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_assistant: true,
            follow_up_suggestions: suggestions,
            is_pending: false,
        }
    }

    pub fn pending(content: impl Into<String>, suggestions: Option<Vec<String>>) -> Self {
        Self {
            is_pending: true,
            ..Self::assistant(content, suggestions)
        }
    }
}

impl From<HistoryEntry> for Message {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            is_assistant: entry.is_assistant(),
            content: entry.content,
            follow_up_suggestions: None,
            is_pending: false,
        }
    }
}
