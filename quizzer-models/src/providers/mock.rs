//! Scripted provider for tests and offline runs.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, EmbedRequest, EmbedResponse, ModelProvider, Usage};
use crate::{Error, Result};

/// Dimension of the letter-frequency vectors produced for unregistered texts.
const FALLBACK_DIMENSIONS: usize = 26;

/// A provider that replays queued chat replies and computes deterministic
/// embeddings.
///
/// Each `chat()` consumes one queued reply. Texts without a registered
/// embedding are embedded as a 26-dimension letter-frequency vector, so
/// texts sharing vocabulary land close together.
#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    embeddings: Mutex<HashMap<String, Vec<f32>>>,
    requests: Mutex<Vec<ChatRequest>>,
    chat_calls: AtomicUsize,
    embed_calls: AtomicUsize,
    fail_embed_at: Mutex<Option<usize>>,
}

impl MockProvider {
    /// Create a provider with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with the given replies queued in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        for reply in replies {
            provider.queue_reply(reply);
        }
        provider
    }

    /// Queue a reply to be returned by the next `chat()`.
    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.lock_replies().push_back(Ok(reply.into()));
    }

    /// Queue a failure to be returned by the next `chat()`.
    pub fn queue_failure(&self, message: impl Into<String>) {
        self.lock_replies()
            .push_back(Err(Error::ProviderApi(message.into())));
    }

    /// Register a fixed embedding for an exact text.
    pub fn set_embedding(&self, text: impl Into<String>, vector: Vec<f32>) {
        if let Ok(mut map) = self.embeddings.lock() {
            map.insert(text.into(), vector);
        }
    }

    /// Make the n-th (0-based) embedded text fail.
    pub fn fail_embedding_at(&self, index: usize) {
        if let Ok(mut slot) = self.fail_embed_at.lock() {
            *slot = Some(index);
        }
    }

    /// Number of `chat()` calls made so far.
    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    /// Number of texts embedded so far.
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    /// Chat requests received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String>>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(vector) = self
            .embeddings
            .lock()
            .ok()
            .and_then(|map| map.get(text).cloned())
        {
            return vector;
        }

        let mut counts = vec![0.0f32; FALLBACK_DIMENSIONS];
        for c in text.chars().filter(char::is_ascii_alphabetic) {
            let idx = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            counts[idx] += 1.0;
        }
        counts
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let reply = self
            .lock_replies()
            .pop_front()
            .unwrap_or_else(|| Err(Error::ProviderApi("no scripted reply queued".to_string())))?;

        Ok(ChatResponse {
            usage: Usage::new(0, reply.split_whitespace().count() as u64),
            content: reply,
        })
    }

    async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse> {
        let fail_at = self.fail_embed_at.lock().ok().and_then(|slot| *slot);
        let mut embeddings = Vec::with_capacity(request.texts.len());

        for text in &request.texts {
            let n = self.embed_calls.fetch_add(1, Ordering::SeqCst);
            if fail_at == Some(n) {
                return Err(Error::Request(format!("scripted embed failure at call {n}")));
            }
            embeddings.push(self.vector_for(text));
        }

        Ok(EmbedResponse { embeddings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Message;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let provider = MockProvider::with_replies(["first", "second"]);
        let req = || ChatRequest::new("m", vec![Message::user("hi")]);

        assert_eq!(provider.chat(req()).await.unwrap().content, "first");
        assert_eq!(provider.chat(req()).await.unwrap().content, "second");
        assert!(provider.chat(req()).await.is_err());
        assert_eq!(provider.chat_calls(), 3);
        assert_eq!(provider.requests().len(), 3);
    }

    #[tokio::test]
    async fn queued_failure_surfaces_as_error() {
        let provider = MockProvider::new();
        provider.queue_failure("model offline");

        let err = provider
            .chat(ChatRequest::new("m", vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("model offline"));
    }

    #[test]
    fn fallback_embedding_counts_letters() {
        let provider = MockProvider::new();
        let response =
            tokio_test::block_on(provider.embed(EmbedRequest::single("m", "Abba!"))).unwrap();

        let v = &response.embeddings[0];
        assert_eq!(v.len(), FALLBACK_DIMENSIONS);
        assert_eq!(v[0], 2.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(provider.embed_calls(), 1);
    }

    #[tokio::test]
    async fn registered_embedding_wins_and_failure_is_scripted() {
        let provider = MockProvider::new();
        provider.set_embedding("alpha", vec![1.0, 0.0]);
        provider.fail_embedding_at(1);

        let ok = provider.embed(EmbedRequest::single("m", "alpha")).await.unwrap();
        assert_eq!(ok.embeddings[0], vec![1.0, 0.0]);

        assert!(provider.embed(EmbedRequest::single("m", "beta")).await.is_err());
    }
}
