use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Marker prefix of protocol data lines. Lines without it (comments,
/// keep-alives) are part of the protocol and carry no events.
pub const DATA_PREFIX: &str = "data: ";

/// One decoded unit of the chat response stream.
///
/// Field names mirror the backend's wire format exactly. Any event may carry
/// a text delta or a suggestion set; `is_final` marks the end of the logical
/// exchange and may itself arrive together with a last text chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Partial response text, to be appended in arrival order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_chunk: Option<String>,

    /// Follow-up prompts the student can click; a new set replaces any
    /// earlier one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_prompts: Option<Vec<String>>,

    /// Signals the end of the exchange.
    #[serde(default)]
    pub is_final: bool,
}

impl StreamEvent {
    pub fn text(chunk: impl Into<String>) -> Self {
        Self {
            text_chunk: Some(chunk.into()),
            ..Self::default()
        }
    }

    pub fn terminal() -> Self {
        Self {
            is_final: true,
            ..Self::default()
        }
    }
}

/// Decode one protocol line.
///
/// Returns `Ok(None)` for lines without the data marker and `Err` for a
/// marker line whose payload does not parse. One bad line never ends the
/// stream: callers log the error and keep pulling.
pub fn parse_line(line: &str) -> Result<Option<StreamEvent>, ClientError> {
    let Some(data) = line.strip_prefix(DATA_PREFIX) else {
        return Ok(None);
    };

    serde_json::from_str(data)
        .map(Some)
        .map_err(|e| ClientError::Decode(format!("bad event payload: {e}")))
}
