//! Gemini SSE stream parsing.
//!
//! `streamGenerateContent?alt=sse` answers with server-sent events whose
//! `data:` payload is a complete `GenerateContentResponse`. Network reads do
//! not line up with event boundaries, so [`SseDecoder`] buffers raw bytes
//! until an event is complete.

use crate::error::{LlmError, Result};
use crate::stream::StreamChunk;

use super::types::GenerateContentResponse;

/// Incremental decoder from raw bytes to SSE `data` payloads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes of the current, not yet terminated line.
    line: Vec<u8>,
    /// `data:` lines of the current event.
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds bytes and returns the payloads of every event they completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut events = Vec::new();

        for &byte in bytes {
            if byte == b'\n' {
                let line = std::mem::take(&mut self.line);
                if let Some(event) = self.end_line(&line) {
                    events.push(event);
                }
            } else {
                self.line.push(byte);
            }
        }

        events
    }

    /// Flushes an event left open when the body ended without a blank line.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.line);
        if !line.is_empty()
            && let Some(event) = self.end_line(&line)
        {
            return Some(event);
        }
        self.take_event()
    }

    fn end_line(&mut self, raw: &[u8]) -> Option<String> {
        // Complete lines never split a UTF-8 sequence.
        let decoded = String::from_utf8_lossy(raw);
        let line = decoded.strip_suffix('\r').unwrap_or(&decoded);

        if line.is_empty() {
            return self.take_event();
        }

        // Comments and non-data fields (event, id, retry) carry nothing we use.
        if let Some(value) = line.strip_prefix("data:") {
            self.data
                .push(value.strip_prefix(' ').unwrap_or(value).to_owned());
        }

        None
    }

    fn take_event(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.data).join("\n"))
    }
}

/// Converts one SSE payload into stream chunks.
///
/// Text parts become [`StreamChunk::Text`], usage metadata becomes
/// [`StreamChunk::Usage`] and a finish reason becomes [`StreamChunk::Done`].
/// A blocked prompt or candidate is an error.
pub fn parse_event(data: &str) -> Result<Vec<StreamChunk>> {
    let data = data.trim();
    if data.is_empty() {
        return Ok(Vec::new());
    }

    tracing::trace!(target: "scribe::gemini", "SSE event: {data}");

    let response: GenerateContentResponse = serde_json::from_str(data).map_err(|e| {
        tracing::warn!("Failed to parse Gemini SSE event: {e}, data: {data}");
        LlmError::stream(format!("Parse error: {e}"))
    })?;

    response.check_blocked()?;

    let mut chunks = Vec::new();
    let finish_reason = response.finish_reason();

    let text = response.text();
    if !text.is_empty() {
        chunks.push(StreamChunk::text(text));
    }

    if let Some(usage) = response.usage_metadata {
        chunks.push(StreamChunk::Usage(usage));
    }

    if let Some(reason) = finish_reason {
        chunks.push(StreamChunk::done(reason));
    }

    Ok(chunks)
}
