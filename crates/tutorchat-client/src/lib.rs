pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod framing;
pub mod traits;

pub use client::TutorChatClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use events::{parse_line, StreamEvent, DATA_PREFIX};
pub use framing::LineFramer;
pub use traits::{ChatBackend, ChatContext, ChatRequest, EventStream, HistoryEntry};
