pub mod ask;
pub mod config;
pub mod generate;
pub mod models;
pub mod quiz;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use quizzer_core::{QuestionLayout, Synthesizer, segment_file};
use quizzer_models::providers::{ModelProvider, OllamaProvider};
use tracing::{debug, warn};

use crate::config::QuizzerConfig;

/// Ollama provider for the configured host.
pub(crate) fn provider(config: &QuizzerConfig) -> Arc<dyn ModelProvider> {
    debug!("Using Ollama at {}", config.ollama.host);
    Arc::new(OllamaProvider::with_base_url(&config.ollama.host))
}

/// Read and segment a document. A missing file is fatal.
pub(crate) fn load_chunks(path: &Path) -> Result<Vec<String>> {
    let chunks = segment_file(path)
        .with_context(|| format!("Cannot read document {}", path.display()))?;
    if chunks.is_empty() {
        warn!("{} contains no paragraphs", path.display());
    }
    Ok(chunks)
}

pub(crate) fn synthesizer(
    provider: Arc<dyn ModelProvider>,
    config: &QuizzerConfig,
    batch: bool,
) -> Synthesizer {
    let layout = if batch || config.quiz.batch {
        QuestionLayout::Batch
    } else {
        QuestionLayout::Single
    };
    Synthesizer::new(provider, &config.models.chat).layout(layout)
}
