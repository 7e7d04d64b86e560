use super::types::{
    ModelsConfig, OllamaConfig, QuizConfig, QuizzerConfig, RagConfig, RawModelsConfig,
    RawOllamaConfig, RawQuizConfig, RawQuizzerConfig, RawRagConfig, RawStorageConfig,
    StorageConfig,
};
use anyhow::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project), then environment overrides
    pub fn load() -> Result<QuizzerConfig> {
        let mut raw = RawQuizzerConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        let mut config = Self::finalize(raw);
        Self::apply_env(&mut config);
        Ok(config)
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "quizzer").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with QUIZZER_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("QUIZZER_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".quizzer/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawQuizzerConfig> {
        debug!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawQuizzerConfig, overlay: RawQuizzerConfig) -> RawQuizzerConfig {
        RawQuizzerConfig {
            ollama: RawOllamaConfig {
                host: overlay.ollama.host.or(base.ollama.host),
            },
            models: RawModelsConfig {
                chat: overlay.models.chat.or(base.models.chat),
                embedding: overlay.models.embedding.or(base.models.embedding),
            },
            rag: RawRagConfig {
                top_k: overlay.rag.top_k.or(base.rag.top_k),
            },
            quiz: RawQuizConfig {
                batch: overlay.quiz.batch.or(base.quiz.batch),
                adaptive: overlay.quiz.adaptive.or(base.quiz.adaptive),
                feedback_delay_ms: overlay
                    .quiz
                    .feedback_delay_ms
                    .or(base.quiz.feedback_delay_ms),
            },
            storage: RawStorageConfig {
                data_dir: overlay.storage.data_dir.or(base.storage.data_dir),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawQuizzerConfig) -> QuizzerConfig {
        let ollama = OllamaConfig::default();
        let models = ModelsConfig::default();
        let quiz = QuizConfig::default();

        QuizzerConfig {
            ollama: OllamaConfig {
                host: raw.ollama.host.unwrap_or(ollama.host),
            },
            models: ModelsConfig {
                chat: raw.models.chat.unwrap_or(models.chat),
                embedding: raw.models.embedding.unwrap_or(models.embedding),
            },
            rag: RagConfig {
                top_k: raw.rag.top_k.unwrap_or(RagConfig::default().top_k),
            },
            quiz: QuizConfig {
                batch: raw.quiz.batch.unwrap_or(quiz.batch),
                adaptive: raw.quiz.adaptive.unwrap_or(quiz.adaptive),
                feedback_delay_ms: raw.quiz.feedback_delay_ms.unwrap_or(quiz.feedback_delay_ms),
            },
            storage: match raw.storage.data_dir {
                Some(data_dir) => StorageConfig { data_dir },
                None => StorageConfig::default(),
            },
        }
    }

    /// OLLAMA_HOST takes precedence over any config file
    fn apply_env(config: &mut QuizzerConfig) {
        if let Ok(host) = std::env::var("OLLAMA_HOST")
            && !host.trim().is_empty()
        {
            config.ollama.host = host.trim().to_string();
        }
    }

    /// Save config to a specific path
    ///
    /// Creates parent directories if they don't exist.
    #[cfg(test)]
    pub fn save_to_path(config: &QuizzerConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(config)?;
        std::fs::write(path, toml)?;

        Ok(())
    }
}
