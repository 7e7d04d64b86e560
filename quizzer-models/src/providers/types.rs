//! Request and response types for model providers.

use serde::{Deserialize, Serialize};

/// Who a chat message is from.
///
/// Earlier model replies are sent back as `Assistant` messages when a
/// request carries conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message of a chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A previous model reply, replayed as history.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Token counts reported by the server, logged at debug level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl Usage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// A chat completion request against one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model name as the server knows it (e.g. `llama3.2:1b`).
    pub model: String,
    pub messages: Vec<Message>,
    /// Sampling temperature; the server default applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
        }
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text.
    pub content: String,
    /// Token usage statistics.
    pub usage: Usage,
}

/// A chunk from a streaming response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Delta content (incremental text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
    /// Whether this is the final chunk.
    #[serde(default)]
    pub done: bool,
    /// Usage statistics (only in the final chunk).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Request for text embeddings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Model name to use.
    pub model: String,
    /// Texts to embed.
    pub texts: Vec<String>,
}

impl EmbedRequest {
    /// Create a new embedding request.
    pub fn new(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            model: model.into(),
            texts,
        }
    }

    /// Request one vector for one text.
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, vec![text.into()])
    }
}

/// Response from an embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Embeddings for each input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_work() {
        let sys = Message::system("You are helpful");
        assert_eq!(sys.role, Role::System);
        assert_eq!(sys.content, "You are helpful");

        assert_eq!(Message::user("Hello").role, Role::User);
    }

    #[test]
    fn chat_request_sets_temperature() {
        let req = ChatRequest::new("llama3.2:1b", vec![Message::user("Hello")])
            .temperature(0.2);

        assert_eq!(req.model, "llama3.2:1b");
        assert_eq!(req.temperature, Some(0.2));
    }

    #[test]
    fn history_keeps_roles_in_order() {
        let req = ChatRequest::new(
            "llama3.2:1b",
            vec![
                Message::user("Who wrote it?"),
                Message::assistant("Anna."),
                Message::user("When?"),
            ],
        );
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["messages"][1]["role"], "assistant");
        assert_eq!(json["messages"][1]["content"], "Anna.");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn request_without_temperature_omits_field() {
        let req = ChatRequest::new("llama3.2:1b", vec![Message::system("Quiz"), Message::user("Text")]);
        let json = serde_json::to_value(&req).unwrap();

        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Text");
    }

    #[test]
    fn usage_calculates_total() {
        let usage = Usage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn embed_request_single_wraps_text() {
        let req = EmbedRequest::single("nomic-embed-text", "a paragraph");
        assert_eq!(req.model, "nomic-embed-text");
        assert_eq!(req.texts, vec!["a paragraph".to_string()]);
    }
}
