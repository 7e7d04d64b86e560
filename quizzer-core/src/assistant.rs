//! Reading assistant: answers questions about a document using its most
//! similar paragraphs as context.

use std::sync::Arc;

use quizzer_models::providers::{ChatRequest, ChatStream, Message, ModelProvider};
use tracing::debug;

use crate::embeddings::{DocumentId, EmbeddingStore};
use crate::rank::top_k;
use crate::synth::prompts;
use crate::{Error, Result};

/// Paragraphs retrieved per question unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// Question answering over one segmented document.
pub struct Assistant {
    provider: Arc<dyn ModelProvider>,
    chat_model: String,
    store: EmbeddingStore,
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    top_k: usize,
}

impl Assistant {
    /// Prepare an assistant for `doc`, embedding its chunks unless the store
    /// already holds them.
    pub async fn load(
        provider: Arc<dyn ModelProvider>,
        chat_model: impl Into<String>,
        store: EmbeddingStore,
        doc: &DocumentId,
        chunks: Vec<String>,
    ) -> Result<Self> {
        let embeddings = store
            .get_embeddings(provider.as_ref(), doc, &chunks)
            .await?;

        if embeddings.len() != chunks.len() {
            return Err(Error::MalformedResponse(format!(
                "{} embeddings cached for {} chunks of {}",
                embeddings.len(),
                chunks.len(),
                doc.name()
            )));
        }

        Ok(Self {
            provider,
            chat_model: chat_model.into(),
            store,
            chunks,
            embeddings,
            top_k: DEFAULT_TOP_K,
        })
    }

    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Most similar paragraphs to `question`, best first, one per line.
    pub async fn context_for(&self, question: &str) -> Result<String> {
        let query = self.store.embed_text(self.provider.as_ref(), question).await?;
        let best = top_k(&query, &self.embeddings, self.top_k);
        debug!(
            "Retrieved chunks {:?} for question",
            best.iter().map(|r| r.index).collect::<Vec<_>>()
        );

        Ok(best
            .iter()
            .filter_map(|r| self.chunks.get(r.index).map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Answer `question` in one reply.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let request = self.request(question).await?;
        let response = self.provider.chat(request).await?;
        Ok(response.content)
    }

    /// Answer `question` as a stream of reply fragments.
    pub async fn ask_stream(&self, question: &str) -> Result<ChatStream> {
        let request = self.request(question).await?;
        Ok(self.provider.chat_stream(request).await?)
    }

    async fn request(&self, question: &str) -> Result<ChatRequest> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }

        let context = self.context_for(question).await?;
        Ok(ChatRequest::new(
            &self.chat_model,
            vec![
                Message::system(format!("{}{}", prompts::READING_ASSISTANT, context)),
                Message::user(question),
            ],
        ))
    }
}

/// One transcript entry, followed by a blank line separating it from the next.
pub fn format_exchange(question: &str, answer: &str) -> String {
    format!("Q: {}\nA: {}\n\n", question.trim(), answer.trim())
}
