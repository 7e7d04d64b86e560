//! Model provider trait and implementations.
//!
//! The [`ModelProvider`] trait is the whole gateway surface the quiz
//! pipeline relies on: embed a text, complete a chat.
//!
//! # Example
//!
//! ```ignore
//! use quizzer_models::providers::{ChatRequest, Message, ModelProvider};
//!
//! async fn chat(provider: &dyn ModelProvider) -> quizzer_models::Result<()> {
//!     let request = ChatRequest::new("llama3.2:1b", vec![Message::user("Hello!")]);
//!     let response = provider.chat(request).await?;
//!     println!("Response: {}", response.content);
//!     Ok(())
//! }
//! ```

mod mock;
mod ollama;
mod types;

use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

pub use mock::MockProvider;
pub use ollama::{
    DEFAULT_BASE_URL, OllamaChatMessage, OllamaChatRequest, OllamaChatResponse,
    OllamaEmbeddingRequest, OllamaEmbeddingResponse, OllamaModel, OllamaProvider,
    OllamaTagsResponse,
};
pub use types::*;

use crate::Result;

/// A stream of chat response chunks for streaming responses.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// Trait for model providers.
///
/// # Required Methods
///
/// - [`name`](ModelProvider::name) - Provider identifier (e.g., "ollama")
/// - [`chat`](ModelProvider::chat) - Non-streaming chat completion
///
/// # Optional Methods
///
/// - [`chat_stream`](ModelProvider::chat_stream) - Streaming chat; by default
///   the full reply is delivered as a single final chunk
/// - [`embed`](ModelProvider::embed) - Text embeddings (returns error by default)
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the provider name (e.g., "ollama", "mock").
    fn name(&self) -> &str;

    /// Perform a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Perform a streaming chat completion request.
    async fn chat_stream(&self, request: ChatRequest) -> Result<ChatStream> {
        let response = self.chat(request).await?;
        let chunk = StreamChunk {
            delta: Some(response.content),
            done: true,
            usage: Some(response.usage),
        };
        Ok(Box::pin(tokio_stream::iter(vec![Ok(chunk)])))
    }

    /// Generate text embeddings, one vector per input text in input order.
    async fn embed(&self, _request: EmbedRequest) -> Result<EmbedResponse> {
        Err(crate::Error::Unsupported(format!(
            "embeddings not supported by provider '{}'",
            self.name()
        )))
    }
}
