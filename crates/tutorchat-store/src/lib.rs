pub mod error;
pub mod kv;
pub mod models;
pub mod store;

pub use error::StorageError;
pub use kv::{KeyValueStore, MemoryStore};
pub use models::{ConversationSummary, DEFAULT_TITLE};
pub use store::{ConversationStore, MAX_CONVERSATIONS};
