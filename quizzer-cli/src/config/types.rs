use quizzer_models::ModelId;
use quizzer_models::providers::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default chat model
pub const DEFAULT_CHAT_MODEL: &str = "llama3.2:1b";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Default pause after grading before the next question
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1500;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawQuizzerConfig {
    #[serde(default)]
    pub ollama: RawOllamaConfig,

    #[serde(default)]
    pub models: RawModelsConfig,

    #[serde(default)]
    pub rag: RawRagConfig,

    #[serde(default)]
    pub quiz: RawQuizConfig,

    #[serde(default)]
    pub storage: RawStorageConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawOllamaConfig {
    pub host: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawModelsConfig {
    pub chat: Option<String>,
    pub embedding: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawRagConfig {
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawQuizConfig {
    pub batch: Option<bool>,
    pub adaptive: Option<bool>,
    pub feedback_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStorageConfig {
    pub data_dir: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuizzerConfig {
    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub rag: RagConfig,

    #[serde(default)]
    pub quiz: QuizConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub host: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model used for question synthesis, lessons, and answers
    pub chat: String,

    /// Model used to embed paragraphs and questions
    pub embedding: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat: DEFAULT_CHAT_MODEL.to_string(),
            embedding: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

impl ModelsConfig {
    /// Identity of the embedding model, used to key the embedding cache.
    pub fn embedding_id(&self) -> ModelId {
        ModelId::new("ollama", &self.embedding)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Paragraphs retrieved as context per question
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: quizzer_core::DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Five questions per paragraph, each with a topic
    pub batch: bool,

    /// Remediation lesson and harder follow-up round after misses
    pub adaptive: bool,

    /// Feedback display time in milliseconds
    pub feedback_delay_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            batch: false,
            adaptive: false,
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root for cached embeddings
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: quizzer_paths::data_dir(),
        }
    }
}

impl StorageConfig {
    pub fn embeddings_dir(&self) -> PathBuf {
        quizzer_paths::embeddings_dir_in(&self.data_dir)
    }
}
