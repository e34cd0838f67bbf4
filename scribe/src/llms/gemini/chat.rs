//! Gemini ChatProvider implementation.

use async_trait::async_trait;
use futures::StreamExt;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{Error, LlmError, Result};
use crate::stream::ChunkStream;

use super::client::Gemini;
use super::stream::{SseDecoder, parse_event};
use super::types::GenerateContentResponse;

impl Gemini {
    /// Send the request to `url`, turning non-2xx statuses into typed errors.
    async fn send(&self, url: &str, request: &ChatRequest) -> Result<reqwest::Response> {
        let body = Self::build_body(request);
        let response = self
            .build_request(url)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for Gemini {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let model = self.resolve_model(request);
        tracing::debug!(
            target: "scribe::gemini",
            model,
            turns = request.contents.len(),
            "generateContent"
        );

        let response = self.send(&self.generate_url(model), request).await?;

        let response_text = response.text().await.map_err(LlmError::from)?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                LlmError::response_format(
                    "valid Gemini response",
                    format!("parse error: {e}, response: {response_text}"),
                )
            })?;

        Ok(parsed.into_chat_response()?)
    }

    async fn chat_stream(&self, request: &ChatRequest) -> Result<ChunkStream> {
        let model = self.resolve_model(request);
        tracing::debug!(
            target: "scribe::gemini",
            model,
            turns = request.contents.len(),
            "streamGenerateContent"
        );

        let response = self.send(&self.stream_url(model), request).await?;
        let mut bytes = response.bytes_stream();

        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();

            while let Some(read) = bytes.next().await {
                let payload = match read {
                    Ok(payload) => payload,
                    Err(e) => {
                        yield Err(Error::from(LlmError::stream(e.to_string())));
                        return;
                    }
                };

                for event in decoder.feed(&payload) {
                    match parse_event(&event) {
                        Ok(chunks) => {
                            for chunk in chunks {
                                yield Ok(chunk);
                            }
                        }
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }

            if let Some(event) = decoder.finish() {
                match parse_event(&event) {
                    Ok(chunks) => {
                        for chunk in chunks {
                            yield Ok(chunk);
                        }
                    }
                    Err(e) => yield Err(e),
                }
            }
        };

        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        self.model()
    }
}
