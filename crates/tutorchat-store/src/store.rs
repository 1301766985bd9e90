use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::kv::KeyValueStore;
use crate::models::{ConversationSummary, DEFAULT_TITLE};

/// Upper bound on retained summaries; least-recently-active evicted first.
pub const MAX_CONVERSATIONS: usize = 15;

const CONVERSATIONS_KEY: &str = "tutorchat.conversations";
const ACTIVE_CONVERSATION_KEY: &str = "tutorchat.active_conversation";

/// Bounded, recency-ordered list of conversation summaries over a key-value
/// backend.
///
/// Every operation is total: a backend failure or an unparsable record is
/// absorbed as empty history and logged, never surfaced to the caller. Each
/// mutation persists through a single `set`, so a failed write leaves the
/// prior record intact.
pub struct ConversationStore<S> {
    kv: S,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// All summaries, most recently active first.
    pub fn load(&self) -> Vec<ConversationSummary> {
        let raw = match self.kv.get(CONVERSATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "conversation list unreadable, starting empty");
                return Vec::new();
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "conversation list corrupted, starting empty");
                return Vec::new();
            }
        };

        // Drop individual malformed entries instead of the whole list.
        let mut summaries: Vec<ConversationSummary> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        sort_by_recency(&mut summaries);
        summaries
    }

    /// Persist `summaries`, re-sorted and truncated to the retention cap.
    pub fn save(&self, mut summaries: Vec<ConversationSummary>) {
        sort_by_recency(&mut summaries);
        summaries.truncate(MAX_CONVERSATIONS);

        let raw = match serde_json::to_string(&summaries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "conversation list not serializable, keeping prior state");
                return;
            }
        };

        if let Err(e) = self.kv.set(CONVERSATIONS_KEY, &raw) {
            warn!(error = %e, "conversation list not persisted, keeping prior state");
        }
    }

    /// Mint a fresh summary with a default title, timestamped now. The
    /// summary is not persisted until it goes through `upsert` or `save`.
    pub fn create_summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: Uuid::new_v4(),
            title: DEFAULT_TITLE.to_string(),
            last_activity: Utc::now(),
        }
    }

    /// Merge `summary` into the stored list by id, or prepend it if absent,
    /// then return the reloaded, sorted list.
    pub fn upsert(&self, summary: ConversationSummary) -> Vec<ConversationSummary> {
        let mut summaries = self.load();

        match summaries.iter_mut().find(|s| s.id == summary.id) {
            Some(existing) => *existing = summary,
            None => summaries.insert(0, summary),
        }

        self.save(summaries);
        self.load()
    }

    /// Delete by id and return the reloaded list.
    pub fn remove(&self, id: Uuid) -> Vec<ConversationSummary> {
        let mut summaries = self.load();
        summaries.retain(|s| s.id != id);
        self.save(summaries);
        self.load()
    }

    /// Persisted id of the conversation the user last had open, if any.
    pub fn active_conversation_id(&self) -> Option<Uuid> {
        match self.kv.get(ACTIVE_CONVERSATION_KEY) {
            Ok(Some(raw)) => raw.parse().ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "active conversation id unreadable");
                None
            }
        }
    }

    pub fn set_active_conversation_id(&self, id: Uuid) {
        if let Err(e) = self.kv.set(ACTIVE_CONVERSATION_KEY, &id.to_string()) {
            warn!(error = %e, "active conversation id not persisted");
        }
    }
}

fn sort_by_recency(summaries: &mut [ConversationSummary]) {
    summaries.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
}
