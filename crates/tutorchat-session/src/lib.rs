pub mod controller;
pub mod message;

pub use controller::{Phase, SessionController};
pub use message::Message;
