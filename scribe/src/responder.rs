//! Single-shot and streaming responders.
//!
//! Both responders follow the same contract over a caller-owned
//! [`ChatHistory`]:
//!
//! 1. the three priming turns are appended (see [`crate::priming`]),
//! 2. the whole history plus the user's query is sent to the provider,
//! 3. on success the model's reply is appended as one `model` turn.
//!
//! The query turn itself is sent but never recorded. On failure only the
//! priming turns remain, the failure is logged, the [`Notifier`] is called
//! exactly once and the typed error is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe::prelude::*;
//!
//! let responder = Responder::new(Gemini::from_env()?).with_notifier(LoggingNotifier);
//! let mut history = ChatHistory::new();
//! let params = ChatParams::new("Summarize", "Doc content").with_prompt_label("summary");
//!
//! let reply = responder.respond(&params, &mut history).await?;
//! assert_eq!(history.len(), 4);
//! ```

use std::sync::Arc;

use futures::StreamExt;

use crate::chat::{ChatProvider, ChatRequest, GenerationConfig};
use crate::error::{Error, Result};
use crate::history::ChatHistory;
use crate::message::Turn;
use crate::notify::{FAILURE_NOTICE, NoopNotifier, Notifier, SharedNotifier};
use crate::priming::{PrimingStyle, prime};
use crate::stream::StreamAggregator;

/// Per-call parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatParams {
    /// The user's question.
    pub query: String,
    /// Document / selection context, sent verbatim as the first priming turn.
    pub context: String,
    /// Model identifier. Empty means the provider's default.
    pub model: String,
    /// Label of the selected prompt template.
    pub prompt_label: String,
}

impl ChatParams {
    /// Creates parameters for `query` grounded in `context`.
    #[must_use]
    pub fn new(query: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: context.into(),
            ..Default::default()
        }
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the prompt template label.
    #[must_use]
    pub fn with_prompt_label(mut self, label: impl Into<String>) -> Self {
        self.prompt_label = label.into();
        self
    }
}

/// Sends priming turns plus the query to a provider and records the reply.
pub struct Responder<P> {
    provider: P,
    notifier: SharedNotifier,
    generation: GenerationConfig,
}

impl<P: std::fmt::Debug> std::fmt::Debug for Responder<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("provider", &self.provider)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<P: ChatProvider> Responder<P> {
    /// Creates a responder that does not notify on failure.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            notifier: Arc::new(NoopNotifier),
            generation: GenerationConfig::default(),
        }
    }

    /// Sets the user-facing failure notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Sets a shared failure notifier.
    #[must_use]
    pub fn with_shared_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the sampling settings sent with every call.
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// The underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Sends the query and waits for the complete reply.
    ///
    /// Appends the labeled priming turns before the call and the reply after
    /// it. Returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns the provider's error after logging it and notifying once. The
    /// priming turns stay in `history`; no reply turn is added.
    pub async fn respond(&self, params: &ChatParams, history: &mut ChatHistory) -> Result<String> {
        prime(
            history,
            &params.context,
            &params.prompt_label,
            PrimingStyle::Labeled,
        );
        let request = self.build_request(params, history);

        match self.provider.chat(&request).await {
            Ok(response) => {
                history.push(Turn::model(response.text.clone()));
                Ok(response.text)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Sends the query in streaming mode, calling `on_chunk` once per text
    /// chunk in arrival order.
    ///
    /// Appends the marked priming turns before the call and, once the stream
    /// is drained, the concatenated reply. There is no cancellation: every
    /// chunk is consumed. Returns the concatenated reply.
    ///
    /// # Errors
    ///
    /// Returns the provider's error after logging it and notifying once. No
    /// reply turn is added; chunks delivered before a mid-stream failure are
    /// not retracted.
    pub async fn respond_stream<F>(
        &self,
        params: &ChatParams,
        history: &mut ChatHistory,
        mut on_chunk: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        prime(
            history,
            &params.context,
            &params.prompt_label,
            PrimingStyle::Marked,
        );
        let request = self.build_request(params, history);

        let mut stream = match self.provider.chat_stream(&request).await {
            Ok(stream) => stream,
            Err(err) => return Err(self.fail(err)),
        };

        let mut aggregator = StreamAggregator::new();
        while let Some(item) = stream.next().await {
            let chunk = match item {
                Ok(chunk) => chunk,
                Err(err) => return Err(self.fail(err)),
            };

            if let Some(text) = chunk.as_text()
                && !text.is_empty()
            {
                on_chunk(text);
            }
            aggregator.apply(&chunk);
        }

        tracing::debug!(
            target: "scribe::responder",
            chunks = aggregator.chunk_count(),
            usage = ?aggregator.usage(),
            "stream complete"
        );

        let reply = aggregator.into_text();
        history.push(Turn::model(reply.clone()));
        Ok(reply)
    }

    /// History plus the query turn, addressed to the requested model.
    fn build_request(&self, params: &ChatParams, history: &ChatHistory) -> ChatRequest {
        let model = if params.model.is_empty() {
            self.provider.default_model().to_owned()
        } else {
            params.model.clone()
        };

        let mut contents = Vec::with_capacity(history.len() + 1);
        contents.extend_from_slice(history.turns());
        contents.push(Turn::user(params.query.clone()));

        ChatRequest::with_contents(model, contents).generation(self.generation.clone())
    }

    fn fail(&self, err: Error) -> Error {
        tracing::error!(
            provider = self.provider.provider_name(),
            error = %err,
            "model request failed"
        );
        self.notifier.notify(FAILURE_NOTICE);
        err
    }
}

#[cfg(feature = "gemini")]
mod gemini {
    use super::{ChatHistory, ChatParams, Responder, Result};
    use crate::llms::{Gemini, GeminiConfig};
    use crate::notify::{FAILURE_NOTICE, LoggingNotifier, Notifier};

    fn responder(api_key: &str) -> Result<Responder<Gemini>> {
        Gemini::new(GeminiConfig::new(api_key))
            .map(|client| Responder::new(client).with_notifier(LoggingNotifier))
            .map_err(|err| {
                tracing::error!(error = %err, "failed to create Gemini client");
                LoggingNotifier.notify(FAILURE_NOTICE);
                err
            })
    }

    /// One-call form of [`Responder::respond`] against Gemini.
    ///
    /// Failures are logged and reported through [`LoggingNotifier`].
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the call fails.
    pub async fn generate_content(
        query: &str,
        context: &str,
        api_key: &str,
        model: &str,
        history: &mut ChatHistory,
        prompt_label: &str,
    ) -> Result<String> {
        let params = ChatParams::new(query, context)
            .with_model(model)
            .with_prompt_label(prompt_label);
        responder(api_key)?.respond(&params, history).await
    }

    /// One-call form of [`Responder::respond_stream`] against Gemini.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built or the call fails.
    pub async fn generate_content_stream<F>(
        query: &str,
        context: &str,
        api_key: &str,
        model: &str,
        history: &mut ChatHistory,
        prompt_label: &str,
        on_chunk: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let params = ChatParams::new(query, context)
            .with_model(model)
            .with_prompt_label(prompt_label);
        responder(api_key)?
            .respond_stream(&params, history, on_chunk)
            .await
    }
}

#[cfg(feature = "gemini")]
pub use gemini::{generate_content, generate_content_stream};
