use futures::StreamExt;
use tracing::{debug, error};
use uuid::Uuid;

use tutorchat_client::{ChatBackend, ClientError};
use tutorchat_store::{ConversationStore, ConversationSummary, KeyValueStore};

use crate::message::Message;

/// Characters of the first user message used as a derived title.
const TITLE_MAX_CHARS: usize = 40;

/// Shown in place of a reply when an exchange fails.
const EXCHANGE_FAILED_MESSAGE: &str =
    "Sorry, something went wrong while getting a response. Please try again.";

/// Where the active conversation is in its send/receive cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Request sent, no event received yet.
    Sending,
    /// At least one event received, terminal event still pending.
    Streaming,
}

/// Orchestrates send/receive cycles for the active conversation.
///
/// Owns the in-memory message list and the active conversation; summary
/// metadata goes through the store, message content never does. At most one
/// exchange is in flight at a time, and a failed exchange surfaces as a
/// synthetic assistant message rather than an error.
pub struct SessionController<B, S> {
    backend: B,
    store: ConversationStore<S>,
    active: ConversationSummary,
    messages: Vec<Message>,
    pending: Option<Message>,
    phase: Phase,
}

impl<B: ChatBackend, S: KeyValueStore> SessionController<B, S> {
    /// Create a controller on a fresh conversation. Call `init` to restore
    /// the previously active one instead.
    pub fn new(backend: B, store: ConversationStore<S>) -> Self {
        let active = store.create_summary();
        Self {
            backend,
            store,
            active,
            messages: Vec::new(),
            pending: None,
            phase: Phase::Idle,
        }
    }

    /// Restore the last active conversation, falling back to the most
    /// recently active stored one, else persist the fresh default.
    pub async fn init(&mut self) {
        let summaries = self.store.load();
        let restored = self
            .store
            .active_conversation_id()
            .and_then(|id| summaries.iter().find(|s| s.id == id).cloned())
            .or_else(|| summaries.first().cloned());

        match restored {
            Some(summary) => {
                debug!(conversation_id = %summary.id, "restoring conversation");
                self.active = summary;
                self.messages = self.load_history(self.active.id).await;
            }
            None => {
                self.store.upsert(self.active.clone());
            }
        }
        self.store.set_active_conversation_id(self.active.id);
    }

    /// Submit one user message and run the exchange to completion.
    ///
    /// Empty or whitespace-only input and re-entry while an exchange is in
    /// flight are rejected without effect. The user message is committed
    /// immediately; the reply accumulates as a pending message until the
    /// terminal event commits it.
    pub async fn send_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.phase != Phase::Idle {
            return;
        }

        self.messages.push(Message::user(text));
        self.phase = Phase::Sending;

        let conversation_id = self.active.id.to_string();
        let mut events = match self.backend.stream(&conversation_id, text).await {
            Ok(events) => events,
            Err(e) => {
                self.fail_exchange(&e);
                return;
            }
        };

        let mut reply = String::new();
        let mut suggestions: Option<Vec<String>> = None;

        loop {
            match events.next().await {
                Some(Ok(event)) => {
                    self.phase = Phase::Streaming;
                    if let Some(chunk) = event.text_chunk {
                        reply.push_str(&chunk);
                    }
                    if let Some(prompts) = event.follow_up_prompts {
                        // Latest set wins; an event without one changes nothing.
                        suggestions = Some(prompts);
                    }
                    if event.is_final {
                        self.commit_exchange(reply, suggestions);
                        return;
                    }
                    self.pending = Some(Message::pending(reply.clone(), suggestions.clone()));
                }
                Some(Err(e)) => {
                    self.fail_exchange(&e);
                    return;
                }
                None => {
                    // The decoder reports a missing terminal event itself;
                    // cover a backend that just stops anyway.
                    self.fail_exchange(&ClientError::UnexpectedEnd);
                    return;
                }
            }
        }
    }

    /// Switch the active conversation. Rejected while an exchange is in
    /// flight; unknown ids are ignored.
    pub async fn select_conversation(&mut self, id: Uuid) {
        if self.phase != Phase::Idle || id == self.active.id {
            return;
        }
        let Some(summary) = self.store.load().into_iter().find(|s| s.id == id) else {
            return;
        };

        self.active = summary;
        self.store.set_active_conversation_id(id);
        self.messages = self.load_history(id).await;
        self.pending = None;
    }

    /// Start a fresh conversation and make it active.
    pub fn new_conversation(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.active = self.store.create_summary();
        self.store.upsert(self.active.clone());
        self.store.set_active_conversation_id(self.active.id);
        self.messages.clear();
        self.pending = None;
    }

    /// Delete a conversation locally and request server-side memory cleanup.
    ///
    /// Deleting the active conversation switches to the most recently active
    /// remaining one, or starts a fresh conversation when none remain.
    pub async fn delete_conversation(&mut self, id: Uuid) {
        if self.phase != Phase::Idle {
            return;
        }

        let remaining = self.store.remove(id);
        self.backend.clear_memory(&id.to_string()).await;

        if id != self.active.id {
            return;
        }

        match remaining.into_iter().next() {
            Some(next) => {
                self.active = next;
                self.messages = self.load_history(self.active.id).await;
            }
            None => {
                self.active = self.store.create_summary();
                self.store.upsert(self.active.clone());
                self.messages.clear();
            }
        }
        self.store.set_active_conversation_id(self.active.id);
        self.pending = None;
    }

    /// Committed messages plus the current pending reply, in display order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().chain(self.pending.iter())
    }

    /// All stored conversation summaries, most recently active first.
    pub fn conversations(&self) -> Vec<ConversationSummary> {
        self.store.load()
    }

    pub fn active_conversation(&self) -> &ConversationSummary {
        &self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while an exchange is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    async fn load_history(&self, id: Uuid) -> Vec<Message> {
        self.backend
            .fetch_history(&id.to_string())
            .await
            .unwrap_or_default()
            .into_iter()
            .map(Message::from)
            .collect()
    }

    fn commit_exchange(&mut self, content: String, suggestions: Option<Vec<String>>) {
        self.messages.push(Message::assistant(content, suggestions));
        self.pending = None;
        self.phase = Phase::Idle;

        if self.active.has_default_title() {
            if let Some(first_user) = self.messages.iter().find(|m| !m.is_assistant) {
                self.active.title = derived_title(&first_user.content);
            }
        }
        self.active.touch();
        self.store.upsert(self.active.clone());
    }

    fn fail_exchange(&mut self, error: &ClientError) {
        error!(conversation_id = %self.active.id, error = %error, "exchange failed");
        self.messages
            .push(Message::assistant(EXCHANGE_FAILED_MESSAGE, None));
        self.pending = None;
        self.phase = Phase::Idle;
    }
}

fn derived_title(first_message: &str) -> String {
    first_message.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::derived_title;

    #[test]
    fn test_derived_title_truncates_by_characters() {
        assert_eq!(derived_title("Hello"), "Hello");

        let long = "x".repeat(100);
        assert_eq!(derived_title(&long).len(), 40);

        // Multi-byte input must not split a character.
        let accented = "é".repeat(100);
        assert_eq!(derived_title(&accented).chars().count(), 40);
    }
}
