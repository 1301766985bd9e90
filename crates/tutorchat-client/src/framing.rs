use std::collections::VecDeque;

use crate::error::ClientError;

/// Reassembles newline-delimited protocol lines from raw network fragments.
///
/// Fragments may split a line anywhere, including in the middle of the data
/// marker. The unterminated tail stays buffered until a later fragment
/// completes it; a tail still buffered when the stream ends is dropped,
/// since the producer always terminates real records with a newline.
pub struct LineFramer {
    buffer: VecDeque<u8>,
}

impl LineFramer {
    /// Create a new framer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract the next complete line (up to `\n`), trimmed.
    ///
    /// Returns `None` while no complete line is buffered.
    pub fn next_line(&mut self) -> Option<Result<String, ClientError>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;

        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();

        match std::str::from_utf8(&line_bytes) {
            Ok(line) => Some(Ok(line.trim().to_string())),
            Err(e) => Some(Err(ClientError::Decode(format!(
                "invalid utf-8 in frame: {e}"
            )))),
        }
    }

    /// Bytes currently buffered.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
