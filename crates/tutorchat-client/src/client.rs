// HTTP implementation of the chat backend (reqwest, no SDK)

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::events::parse_line;
use crate::framing::LineFramer;
use crate::traits::{ChatBackend, ChatContext, ChatRequest, EventStream, HistoryEntry};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client for the tutor chat backend.
pub struct TutorChatClient {
    http_client: reqwest::Client,
    base_url: String,
    context: ChatContext,
}

impl TutorChatClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            context: ChatContext {
                user_id: config.user_id,
                tutor_name: config.tutor_name,
            },
        })
    }

    /// The request context sent with every exchange.
    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    fn chat_url(&self) -> String {
        format!("{}/aitutor/chat", self.base_url)
    }

    fn memory_url(&self, conversation_id: &str) -> String {
        format!("{}/aitutor/memory/{}", self.base_url, conversation_id)
    }
}

#[async_trait]
impl ChatBackend for TutorChatClient {
    async fn stream(
        &self,
        conversation_id: &str,
        message: &str,
    ) -> Result<EventStream, ClientError> {
        let payload = ChatRequest {
            conversation_id: conversation_id.to_string(),
            message: message.to_string(),
            context: self.context.clone(),
        };

        let response = self
            .http_client
            .post(self.chat_url())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Transport { status, body });
        }

        // A success response with a known-empty body has nothing to stream.
        if response.content_length() == Some(0) {
            return Err(ClientError::StreamUnavailable);
        }

        Ok(decode_event_stream(response))
    }

    async fn fetch_history(&self, conversation_id: &str) -> Option<Vec<HistoryEntry>> {
        let response = match self
            .http_client
            .get(self.memory_url(conversation_id))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(conversation_id, error = %e, "history fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(conversation_id, status = %response.status(), "no stored history");
            return None;
        }

        response.json().await.ok()
    }

    async fn clear_memory(&self, conversation_id: &str) {
        if let Err(e) = self
            .http_client
            .delete(self.memory_url(conversation_id))
            .send()
            .await
        {
            tracing::warn!(conversation_id, error = %e, "failed to clear conversation memory");
        }
    }
}

/// Decode a streaming chat response into an ordered event sequence.
///
/// Pull-driven: each `next()` call reads at most one further chunk from the
/// response body. The sequence ends right after the terminal event; running
/// out of bytes before one arrives yields `UnexpectedEnd`. Malformed frames
/// are logged and skipped without ending the sequence.
pub(crate) fn decode_event_stream(response: reqwest::Response) -> EventStream {
    let stream = response.bytes_stream();

    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(stream);
        let mut framer = LineFramer::with_capacity(4096);
        let mut completed = false;

        'read: while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => framer.extend(&bytes),
                Err(e) => {
                    yield Err(ClientError::Http(e));
                    completed = true;
                    break 'read;
                }
            }

            // Process all complete lines in the buffer.
            while let Some(line_result) = framer.next_line() {
                let line = match line_result {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping undecodable frame");
                        continue;
                    }
                };

                if line.is_empty() {
                    continue;
                }

                match parse_line(&line) {
                    Ok(Some(event)) => {
                        let is_final = event.is_final;
                        yield Ok(event);
                        if is_final {
                            completed = true;
                            break 'read;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "skipping malformed event"),
                }
            }
        }

        if !completed {
            yield Err(ClientError::UnexpectedEnd);
        }
    })
}
