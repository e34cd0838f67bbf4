//! Scripted provider for testing.
//!
//! [`MockProvider`] answers from a queue of predefined [`MockReply`]s and
//! records every request it receives, so responder behaviour can be checked
//! without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe::llms::mock::{MockProvider, MockReply};
//!
//! let provider = MockProvider::new()
//!     .reply("Hello!")
//!     .reply(MockReply::chunks(["Hel", "lo"]))
//!     .reply(MockReply::fail(LlmError::network("offline")));
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{Error, LlmError, Result};
use crate::stream::{ChunkStream, FinishReason, StreamChunk};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A complete reply; streamed as a single chunk.
    Text(String),
    /// A reply delivered as these chunks, in order.
    Chunks(Vec<String>),
    /// The call fails before producing anything.
    Fail(LlmError),
    /// The stream yields `chunks`, then fails. Single-shot calls fail outright.
    FailAfter {
        /// Chunks delivered before the failure.
        chunks: Vec<String>,
        /// The failure.
        error: LlmError,
    },
}

impl MockReply {
    /// Creates a chunked reply.
    #[must_use]
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Chunks(chunks.into_iter().map(Into::into).collect())
    }

    /// Creates a failing reply.
    #[must_use]
    pub const fn fail(error: LlmError) -> Self {
        Self::Fail(error)
    }
}

impl From<&str> for MockReply {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for MockReply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A provider that replays scripted replies in order.
#[derive(Debug)]
pub struct MockProvider {
    model: String,
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Creates a provider with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_owned(),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sets the model reported as default.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Queues a reply.
    #[must_use]
    pub fn reply(self, reply: impl Into<MockReply>) -> Self {
        self.push_reply(reply);
        self
    }

    /// Queues a reply through a shared reference.
    pub fn push_reply(&self, reply: impl Into<MockReply>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply.into());
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn next_reply(&self, request: &ChatRequest) -> Result<MockReply> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| LlmError::internal("mock provider has no scripted reply").into())
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        match self.next_reply(request)? {
            MockReply::Text(text) => Ok(ChatResponse::new(text)),
            MockReply::Chunks(chunks) => Ok(ChatResponse::new(chunks.concat())),
            MockReply::Fail(error) | MockReply::FailAfter { error, .. } => Err(error.into()),
        }
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream> {
        let (chunks, error) = match self.next_reply(request)? {
            MockReply::Text(text) => (vec![text], None),
            MockReply::Chunks(chunks) => (chunks, None),
            MockReply::Fail(error) => return Err(error.into()),
            MockReply::FailAfter { chunks, error } => (chunks, Some(error)),
        };

        let mut items: Vec<Result<StreamChunk>> =
            chunks.into_iter().map(|c| Ok(StreamChunk::text(c))).collect();
        match error {
            Some(error) => items.push(Err(Error::from(error))),
            None => items.push(Ok(StreamChunk::done(FinishReason::Stop))),
        }

        Ok(Box::pin(futures::stream::iter(items)))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let provider = MockProvider::new().reply("first").reply("second");
        let request = ChatRequest::new("m").user("hi");

        assert_eq!(provider.chat(&request).await.unwrap().text, "first");
        assert_eq!(provider.chat(&request).await.unwrap().text, "second");
        assert!(provider.chat(&request).await.is_err());
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_streams_chunks_then_done() {
        let provider = MockProvider::new().reply(MockReply::chunks(["a", "b"]));
        let stream = provider.chat_stream(&ChatRequest::new("m")).await.unwrap();
        let items: Vec<StreamChunk> = stream.map(Result::unwrap).collect().await;

        assert_eq!(
            items,
            vec![
                StreamChunk::text("a"),
                StreamChunk::text("b"),
                StreamChunk::done(FinishReason::Stop),
            ]
        );
    }

    #[tokio::test]
    async fn test_fail_after_yields_error_last() {
        let provider = MockProvider::new().reply(MockReply::FailAfter {
            chunks: vec!["partial".into()],
            error: LlmError::network("reset"),
        });
        let items: Vec<Result<StreamChunk>> = provider
            .chat_stream(&ChatRequest::new("m"))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn test_records_requests() {
        let provider = MockProvider::new().reply("ok");
        provider
            .chat(&ChatRequest::new("gemini-test").user("q"))
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gemini-test");
        assert_eq!(requests[0].contents[0].text(), "q");
    }
}
