//! Ollama local model provider.
//!
//! Connects to a local Ollama instance for chat models (Llama, Mistral, ...)
//! and embedding models (nomic-embed-text, ...).
//!
//! # Example
//!
//! ```ignore
//! use quizzer_models::providers::OllamaProvider;
//!
//! let provider = OllamaProvider::new();  // Uses localhost:11434
//! let provider = OllamaProvider::with_base_url("http://192.168.1.100:11434");
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::RwLock;

use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatRequest, ChatResponse, ChatStream, EmbedRequest, EmbedResponse, StreamChunk, Usage};
use crate::{Capabilities, Error, ModelInfo, Result};

/// Default Ollama API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

// ────────────────────────────────────────────────────────────────────────────
// Ollama API Types
// ────────────────────────────────────────────────────────────────────────────

/// Response from Ollama's `/api/tags` endpoint.
#[derive(Debug, Deserialize)]
pub struct OllamaTagsResponse {
    pub models: Vec<OllamaModel>,
}

/// Model information from Ollama's API.
#[derive(Debug, Deserialize)]
pub struct OllamaModel {
    pub name: String,
    pub size: u64,
}

impl OllamaModel {
    /// Convert to a `ModelInfo`.
    ///
    /// Ollama does not report capabilities in `/api/tags`; names containing
    /// "embed" are treated as embedding models.
    pub fn to_model_info(&self) -> ModelInfo {
        let capabilities = if self.name.contains("embed") {
            Capabilities::embeddings()
        } else {
            Capabilities::chat()
        };
        ModelInfo::builder("ollama", &self.name)
            .capabilities(capabilities)
            .size_bytes(self.size)
            .build()
    }
}

/// Message in an Ollama chat request/response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for Ollama's `/api/chat` endpoint.
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaChatMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaChatOptions>,
}

impl OllamaChatRequest {
    /// Build the wire request from a provider-neutral chat request.
    pub fn from_request(request: ChatRequest, stream: bool) -> Self {
        let messages = request
            .messages
            .iter()
            .map(|m| OllamaChatMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();

        let options = request
            .temperature
            .map(|temperature| OllamaChatOptions { temperature });

        Self {
            model: request.model,
            messages,
            stream,
            options,
        }
    }
}

/// Sampling options for Ollama's `/api/chat`.
#[derive(Debug, Serialize)]
pub struct OllamaChatOptions {
    pub temperature: f32,
}

/// Response from Ollama's `/api/chat` endpoint.
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub message: OllamaChatMessage,
    pub done: bool,
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

impl From<OllamaChatResponse> for ChatResponse {
    fn from(response: OllamaChatResponse) -> Self {
        Self {
            usage: Usage::new(
                response.prompt_eval_count.unwrap_or(0),
                response.eval_count.unwrap_or(0),
            ),
            content: response.message.content,
        }
    }
}

impl OllamaChatResponse {
    /// Convert to a streaming chunk.
    pub fn to_stream_chunk(&self) -> StreamChunk {
        StreamChunk {
            delta: if self.message.content.is_empty() {
                None
            } else {
                Some(self.message.content.clone())
            },
            done: self.done,
            usage: if self.done {
                Some(Usage::new(
                    self.prompt_eval_count.unwrap_or(0),
                    self.eval_count.unwrap_or(0),
                ))
            } else {
                None
            },
        }
    }
}

/// Request body for Ollama's `/api/embeddings` endpoint.
#[derive(Debug, Serialize)]
pub struct OllamaEmbeddingRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
}

/// Response from Ollama's `/api/embeddings` endpoint.
#[derive(Debug, Deserialize)]
pub struct OllamaEmbeddingResponse {
    pub embedding: Vec<f32>,
}

// ────────────────────────────────────────────────────────────────────────────
// NDJSON stream decoding
// ────────────────────────────────────────────────────────────────────────────

/// Reassembles newline-terminated lines from arbitrarily split byte chunks.
///
/// A read may hold several lines or end mid-line (even mid-character), so
/// bytes are buffered until their terminating `\n` arrives.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append a read and return every line it completed.
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(end) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Whatever is left once the body ends without a final newline.
    fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Parse one NDJSON line. Blank lines and chunks with neither text nor the
/// final marker yield nothing.
fn parse_stream_line(line: &str) -> Option<Result<StreamChunk>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<OllamaChatResponse>(trimmed) {
        Ok(response) => {
            let chunk = response.to_stream_chunk();
            (chunk.delta.is_some() || chunk.done).then_some(Ok(chunk))
        }
        Err(e) => Some(Err(Error::Serialization(e))),
    }
}

struct NdjsonState<S> {
    bytes: Pin<Box<S>>,
    lines: LineBuffer,
    ready: VecDeque<Result<StreamChunk>>,
    exhausted: bool,
}

/// Turn an `/api/chat` streaming body into chat chunks, one per NDJSON line.
fn ndjson_chunks<S, B, E>(bytes: S) -> ChatStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let state = NdjsonState {
        bytes: Box::pin(bytes),
        lines: LineBuffer::default(),
        ready: VecDeque::new(),
        exhausted: false,
    };

    let stream = futures_util::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.ready.pop_front() {
                return Some((item, state));
            }
            if state.exhausted {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    let parsed = state.lines.push(bytes.as_ref());
                    state
                        .ready
                        .extend(parsed.iter().filter_map(|line| parse_stream_line(line)));
                }
                Some(Err(e)) => {
                    state.exhausted = true;
                    state.ready.push_back(Err(Error::Request(e.to_string())));
                }
                None => {
                    state.exhausted = true;
                    if let Some(rest) = state.lines.finish() {
                        state.ready.extend(parse_stream_line(&rest));
                    }
                }
            }
        }
    });

    Box::pin(stream)
}

// ────────────────────────────────────────────────────────────────────────────
// OllamaProvider
// ────────────────────────────────────────────────────────────────────────────

/// Ollama local model provider.
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
    cached_models: RwLock<Vec<ModelInfo>>,
}

impl OllamaProvider {
    /// Create a new Ollama provider with default URL (localhost:11434).
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new Ollama provider with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            cached_models: RwLock::new(Vec::new()),
        }
    }

    /// Get the base URL for this provider.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the list of cached models.
    ///
    /// Call [`refresh_models`](Self::refresh_models) to update from the Ollama API.
    pub fn models(&self) -> Vec<ModelInfo> {
        self.cached_models
            .read()
            .map(|models| models.clone())
            .unwrap_or_default()
    }

    /// Refresh the model list from `/api/tags`.
    pub async fn refresh_models(&self) -> Result<()> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::ProviderApi(format!(
                "Ollama API returned status {}",
                response.status()
            )));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        let models: Vec<ModelInfo> = tags.models.iter().map(|m| m.to_model_info()).collect();
        debug!("Ollama reports {} models", models.len());

        if let Ok(mut cached) = self.cached_models.write() {
            *cached = models;
        }
        Ok(())
    }

    /// POST a JSON body and fail on non-success status.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProviderApi(format!(
                "Ollama API returned {}: {}",
                status, body
            )));
        }
        Ok(response)
    }

    /// Perform a chat completion request.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let ollama_request = OllamaChatRequest::from_request(request, false);
        let response = self.post("/api/chat", &ollama_request).await?;

        let ollama_response: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        Ok(ollama_response.into())
    }

    /// Perform a streaming chat completion request.
    pub async fn chat_stream(&self, request: ChatRequest) -> Result<ChatStream> {
        let ollama_request = OllamaChatRequest::from_request(request, true);
        let response = self.post("/api/chat", &ollama_request).await?;
        Ok(ndjson_chunks(response.bytes_stream()))
    }

    /// Embed each text with one `/api/embeddings` call, in input order.
    pub async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse> {
        let mut embeddings = Vec::with_capacity(request.texts.len());
        for text in &request.texts {
            let body = OllamaEmbeddingRequest {
                model: &request.model,
                prompt: text,
            };
            let response = self.post("/api/embeddings", &body).await?;
            let parsed: OllamaEmbeddingResponse = response
                .json()
                .await
                .map_err(|e| Error::Request(e.to_string()))?;
            if parsed.embedding.is_empty() {
                return Err(Error::ProviderApi(format!(
                    "model '{}' returned an empty embedding",
                    request.model
                )));
            }
            embeddings.push(parsed.embedding);
        }
        Ok(EmbedResponse { embeddings })
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl super::ModelProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        OllamaProvider::chat(self, request).await
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<ChatStream> {
        OllamaProvider::chat_stream(self, request).await
    }

    async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse> {
        OllamaProvider::embed(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Message, ModelProvider};

    #[test]
    fn new_creates_provider_with_default_url() {
        let provider = OllamaProvider::new();
        assert_eq!(provider.base_url(), "http://localhost:11434");
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let provider = OllamaProvider::with_base_url("http://192.168.1.100:11434/");
        assert_eq!(provider.base_url(), "http://192.168.1.100:11434");
    }

    #[test]
    fn name_returns_ollama() {
        let provider = OllamaProvider::new();
        assert_eq!(ModelProvider::name(&provider), "ollama");
    }

    // ────────────────────────────────────────────────────────────────────────────
    // Model Discovery Tests
    // ────────────────────────────────────────────────────────────────────────────

    #[test]
    fn parse_tags_response_extracts_models() {
        let json = r#"{
            "models": [
                {
                    "name": "llama3.2:1b",
                    "model": "llama3.2:1b",
                    "modified_at": "2024-10-01T10:00:00Z",
                    "size": 1321098329,
                    "digest": "abc123"
                },
                {
                    "name": "nomic-embed-text:latest",
                    "model": "nomic-embed-text:latest",
                    "modified_at": "2024-09-14T10:00:00Z",
                    "size": 274302450,
                    "digest": "def456"
                }
            ]
        }"#;

        let response: OllamaTagsResponse = serde_json::from_str(json).unwrap();
        let infos: Vec<ModelInfo> = response.models.iter().map(|m| m.to_model_info()).collect();

        assert_eq!(infos.len(), 2);
        assert!(infos[0].capabilities.chat);
        assert!(infos[1].capabilities.embeddings);
        assert_eq!(infos[1].size_bytes, Some(274302450));
    }

    #[test]
    fn models_returns_empty_when_not_refreshed() {
        let provider = OllamaProvider::new();
        assert!(provider.models().is_empty());
    }

    // ────────────────────────────────────────────────────────────────────────────
    // Chat API Tests
    // ────────────────────────────────────────────────────────────────────────────

    #[test]
    fn chat_request_maps_roles_and_options() {
        let request = ChatRequest::new(
            "llama3.2:1b",
            vec![Message::system("be brief"), Message::user("hi")],
        )
        .temperature(0.1);

        let wire = OllamaChatRequest::from_request(request, false);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["model"], "llama3.2:1b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!((json["options"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn chat_request_without_options_omits_field() {
        let request = ChatRequest::new("llama3.2:1b", vec![Message::user("hi")]);
        let json = serde_json::to_value(OllamaChatRequest::from_request(request, true)).unwrap();
        assert!(json.get("options").is_none());
        assert_eq!(json["stream"], true);
    }

    #[test]
    fn parse_chat_response_converts_to_chat_response() {
        let json = r#"{
            "model": "llama3.2:1b",
            "created_at": "2024-10-01T10:00:00Z",
            "message": {
                "role": "assistant",
                "content": "Q: What colour is the sky?"
            },
            "done": true,
            "prompt_eval_count": 10,
            "eval_count": 15
        }"#;

        let response: OllamaChatResponse = serde_json::from_str(json).unwrap();
        let response: ChatResponse = response.into();

        assert_eq!(response.content, "Q: What colour is the sky?");
        assert_eq!(response.usage.input_tokens, 10);
        assert_eq!(response.usage.output_tokens, 15);
    }

    // ────────────────────────────────────────────────────────────────────────────
    // Streaming Tests
    // ────────────────────────────────────────────────────────────────────────────

    #[test]
    fn intermediate_chunk_has_delta_only() {
        let chunk = OllamaChatResponse {
            message: OllamaChatMessage {
                role: "assistant".to_string(),
                content: "Hello".to_string(),
            },
            done: false,
            prompt_eval_count: None,
            eval_count: None,
        }
        .to_stream_chunk();

        assert_eq!(chunk.delta.as_deref(), Some("Hello"));
        assert!(!chunk.done);
        assert!(chunk.usage.is_none());
    }

    #[test]
    fn final_chunk_carries_usage() {
        let chunk = OllamaChatResponse {
            message: OllamaChatMessage {
                role: "assistant".to_string(),
                content: String::new(),
            },
            done: true,
            prompt_eval_count: Some(10),
            eval_count: Some(15),
        }
        .to_stream_chunk();

        assert!(chunk.delta.is_none());
        assert!(chunk.done);
        assert_eq!(chunk.usage.unwrap().total_tokens, 25);
    }

    // ────────────────────────────────────────────────────────────────────────────
    // Streaming Tests
    // ────────────────────────────────────────────────────────────────────────────

    const HEL: &str = r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#;
    const LO: &str = r#"{"message":{"role":"assistant","content":"lo"},"done":false}"#;
    const DONE: &str = r#"{"message":{"role":"assistant","content":""},"done":true,"prompt_eval_count":3,"eval_count":2}"#;

    /// Feed the decoder the given reads and collect the streamed text.
    async fn decode(reads: Vec<String>) -> (String, Vec<StreamChunk>) {
        let bytes = futures_util::stream::iter(
            reads
                .into_iter()
                .map(|r| Ok::<_, std::io::Error>(r.into_bytes())),
        );
        let chunks: Vec<StreamChunk> = ndjson_chunks(bytes)
            .map(|c| c.expect("chunk should decode"))
            .collect()
            .await;
        let text = chunks.iter().filter_map(|c| c.delta.clone()).collect();
        (text, chunks)
    }

    #[test]
    fn line_buffer_holds_partial_lines() {
        let mut lines = LineBuffer::default();
        assert!(lines.push(b"{\"a\":").is_empty());
        assert_eq!(lines.push(b"1}\n{\"b\":2}\n{"), vec!["{\"a\":1}\n", "{\"b\":2}\n"]);
        assert_eq!(lines.finish().as_deref(), Some("{"));
        assert!(lines.finish().is_none());
    }

    #[test]
    fn line_buffer_rejoins_split_utf8() {
        let mut lines = LineBuffer::default();
        let text = "caf\u{e9}\n".as_bytes();
        assert!(lines.push(&text[..4]).is_empty());
        assert_eq!(lines.push(&text[4..]), vec!["caf\u{e9}\n"]);
    }

    #[tokio::test]
    async fn stream_decodes_two_lines_in_one_read() {
        let (text, chunks) = decode(vec![format!("{HEL}\n{LO}\n{DONE}\n")]).await;

        assert_eq!(text, "Hello");
        assert!(chunks.last().unwrap().done);
    }

    #[tokio::test]
    async fn stream_decodes_line_split_across_reads() {
        let (head, tail) = LO.split_at(20);
        let reads = vec![
            format!("{HEL}\n{head}"),
            format!("{tail}\n"),
            DONE.to_string(),
        ];
        let (text, chunks) = decode(reads).await;

        assert_eq!(text, "Hello");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].usage.as_ref().unwrap().total_tokens, 5);
    }

    #[tokio::test]
    async fn stream_reports_invalid_line() {
        let bytes = futures_util::stream::iter(vec![Ok::<_, std::io::Error>(
            b"not json\n".to_vec(),
        )]);
        let results: Vec<Result<StreamChunk>> = ndjson_chunks(bytes).collect().await;

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(Error::Serialization(_))));
    }

    #[tokio::test]
    async fn chat_stream_reads_batched_ndjson_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = format!("{HEL}\n{LO}\n{DONE}\n");

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // Read headers, then the JSON body announced by content-length.
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/x-ndjson\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        let provider = OllamaProvider::with_base_url(format!("http://{addr}"));
        let stream = provider
            .chat_stream(ChatRequest::new("llama3.2:1b", vec![Message::user("hi")]))
            .await
            .unwrap();
        let text: String = stream
            .map(|c| c.unwrap().delta.unwrap_or_default())
            .collect::<Vec<_>>()
            .await
            .concat();

        assert_eq!(text, "Hello");
        server.await.unwrap();
    }

    // ────────────────────────────────────────────────────────────────────────────
    // Embedding Tests
    // ────────────────────────────────────────────────────────────────────────────

    #[test]
    fn embedding_request_uses_prompt_field() {
        let body = OllamaEmbeddingRequest {
            model: "nomic-embed-text",
            prompt: "a paragraph",
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"model":"nomic-embed-text","prompt":"a paragraph"}"#);
    }

    #[test]
    fn parse_embedding_response() {
        let json = r#"{"embedding": [0.5, -0.25, 1.0]}"#;
        let response: OllamaEmbeddingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.embedding, vec![0.5, -0.25, 1.0]);
    }

    // ────────────────────────────────────────────────────────────────────────────
    // Integration Tests (require Ollama running)
    // ────────────────────────────────────────────────────────────────────────────

    /// Check if Ollama is available at the given URL.
    async fn ollama_available(base_url: &str) -> bool {
        let client = reqwest::Client::new();
        client
            .get(format!("{}/api/tags", base_url))
            .timeout(std::time::Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }

    #[tokio::test]
    #[ignore = "requires Ollama running locally with an embedding model installed"]
    async fn integration_embed_returns_one_vector_per_text() {
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        if !ollama_available(&base_url).await {
            eprintln!("Skipping: Ollama not available at {}", base_url);
            return;
        }

        let provider = OllamaProvider::with_base_url(&base_url);
        let response = provider
            .embed(EmbedRequest::new(
                "nomic-embed-text",
                vec!["first".to_string(), "second".to_string()],
            ))
            .await
            .expect("embed should succeed");

        assert_eq!(response.embeddings.len(), 2);
        assert_eq!(response.embeddings[0].len(), response.embeddings[1].len());
    }

    #[tokio::test]
    #[ignore = "requires Ollama running locally with a model installed"]
    async fn integration_chat_sends_request_to_ollama() {
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        if !ollama_available(&base_url).await {
            eprintln!("Skipping: Ollama not available at {}", base_url);
            return;
        }

        let provider = OllamaProvider::with_base_url(&base_url);
        provider
            .refresh_models()
            .await
            .expect("refresh should succeed");

        let Some(model) = provider
            .models()
            .into_iter()
            .find(|m| m.capabilities.chat)
        else {
            eprintln!("Skipping: No chat models installed in Ollama");
            return;
        };

        let request =
            ChatRequest::new(&model.name, vec![Message::user("Say 'hello' and nothing else.")]);
        let response = provider.chat(request).await.expect("chat should succeed");
        assert!(!response.content.is_empty());
    }
}
