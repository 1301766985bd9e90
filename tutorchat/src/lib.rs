//! # Tutorchat - streaming chat client for an AI tutoring service
//!
//! Tutorchat gives a chat UI its correctness guarantees under network
//! streaming and local persistence:
//!
//! - **Streaming protocol client**: reassembles partial network reads into
//!   complete events and exposes them as a lazy, pull-driven sequence
//! - **Conversation store**: a bounded, recency-ordered history of
//!   conversation summaries over an injected key-value backend
//! - **Session controller**: maps streamed deltas onto finalized messages
//!   and conversation metadata, one exchange in flight at a time
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tutorchat::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::new("user-42", "Ada")
//!         .with_base_url("http://localhost:8000");
//!     let client = TutorChatClient::new(config)?;
//!     let store = ConversationStore::new(MemoryStore::new());
//!
//!     let mut session = SessionController::new(client, store);
//!     session.init().await;
//!
//!     session.send_message("What is ownership in Rust?").await;
//!
//!     for message in session.messages() {
//!         let who = if message.is_assistant { "tutor" } else { "you" };
//!         println!("{who}: {}", message.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Tutorchat consists of three composable crates:
//!
//! - **tutorchat-client**: frame decoding, event parsing, and the HTTP
//!   streaming client
//! - **tutorchat-store**: the conversation summary store and the key-value
//!   capability it writes through
//! - **tutorchat-session**: the send/receive state machine gluing the two
//!   together

pub use tutorchat_client as client;
pub use tutorchat_session as session;
pub use tutorchat_store as store;

pub mod prelude {
    //! Everything a UI layer typically needs.
    pub use tutorchat_client::{
        ChatBackend, ClientConfig, ClientError, EventStream, HistoryEntry, StreamEvent,
        TutorChatClient,
    };
    pub use tutorchat_session::{Message, Phase, SessionController};
    pub use tutorchat_store::{
        ConversationStore, ConversationSummary, KeyValueStore, MemoryStore,
    };
}
