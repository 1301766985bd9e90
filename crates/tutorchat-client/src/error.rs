use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("chat endpoint returned {status}: {body}")]
    Transport { status: StatusCode, body: String },

    #[error("response has no readable body")]
    StreamUnavailable,

    #[error("malformed frame: {0}")]
    Decode(String),

    #[error("stream closed before a terminal event")]
    UnexpectedEnd,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
