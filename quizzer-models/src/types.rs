//! Core types for model identity and discovery.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a model in format `provider:model_name`.
///
/// Model names may themselves contain colons (Ollama tags such as
/// `llama3.2:1b`), so only the first colon separates the provider.
///
/// # Examples
///
/// ```
/// use quizzer_models::ModelId;
///
/// let id = ModelId::new("ollama", "llama3.2:1b");
/// assert_eq!(id.provider(), "ollama");
/// assert_eq!(id.model(), "llama3.2:1b");
/// assert_eq!(id.to_string(), "ollama:llama3.2:1b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new model ID from provider and model name.
    pub fn new(provider: &str, model: &str) -> Self {
        Self(format!("{provider}:{model}"))
    }

    /// Get the provider portion of the ID.
    pub fn provider(&self) -> &str {
        self.0.split_once(':').map(|(p, _)| p).unwrap_or("")
    }

    /// Get the model name portion of the ID.
    pub fn model(&self) -> &str {
        self.0.split_once(':').map(|(_, m)| m).unwrap_or("")
    }

    /// Get the full ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe form of the ID, used for cache directory names.
    pub fn slug(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a model can be used for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub chat: bool,
    pub embeddings: bool,
    pub streaming: bool,
}

impl Capabilities {
    pub fn chat() -> Self {
        Self {
            chat: true,
            streaming: true,
            ..Default::default()
        }
    }

    pub fn embeddings() -> Self {
        Self {
            embeddings: true,
            ..Default::default()
        }
    }
}

/// A model installed on a provider, as listed by `quizzer models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: ModelId,
    /// Model name as the provider knows it, including any tag.
    pub name: String,
    pub capabilities: Capabilities,
    /// On-disk size in bytes, when the provider reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl ModelInfo {
    pub fn builder(provider: &str, name: &str) -> ModelInfoBuilder {
        ModelInfoBuilder::new(provider, name)
    }
}

#[derive(Debug)]
pub struct ModelInfoBuilder {
    id: ModelId,
    name: String,
    capabilities: Capabilities,
    size_bytes: Option<u64>,
}

impl ModelInfoBuilder {
    fn new(provider: &str, name: &str) -> Self {
        Self {
            id: ModelId::new(provider, name),
            name: name.to_string(),
            capabilities: Capabilities::default(),
            size_bytes: None,
        }
    }

    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.capabilities = caps;
        self
    }

    pub fn size_bytes(mut self, size: u64) -> Self {
        self.size_bytes = Some(size);
        self
    }

    pub fn build(self) -> ModelInfo {
        ModelInfo {
            id: self.id,
            name: self.name,
            capabilities: self.capabilities,
            size_bytes: self.size_bytes,
        }
    }
}
