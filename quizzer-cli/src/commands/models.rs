//! Model listing command.
//!
//! Shows the models installed on the configured Ollama server and marks the
//! ones quizzer is configured to use.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use quizzer_models::providers::OllamaProvider;
use quizzer_models::{Capabilities, ModelInfo};
use tracing::debug;

use crate::config::{ConfigLoader, QuizzerConfig};

/// Models command arguments.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Only show embedding models
    #[arg(long)]
    pub embeddings: bool,
}

/// Run models command.
pub async fn run(args: ModelsArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let ollama = OllamaProvider::with_base_url(&config.ollama.host);

    ollama
        .refresh_models()
        .await
        .with_context(|| format!("Ollama not reachable at {}", ollama.base_url()))?;

    let models: Vec<ModelInfo> = ollama
        .models()
        .into_iter()
        .filter(|m| !args.embeddings || m.capabilities.embeddings)
        .collect();
    debug!("Ollama reported {} models", models.len());

    if models.is_empty() {
        println!("No models installed.");
        println!();
        println!("Pull the defaults with:");
        println!("  ollama pull {}", config.models.chat);
        println!("  ollama pull {}", config.models.embedding);
        return Ok(());
    }

    println!("{}", models_table(&models, &config));
    Ok(())
}

fn models_table(models: &[ModelInfo], config: &QuizzerConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Model").fg(Color::Cyan),
        Cell::new("Size").fg(Color::Cyan),
        Cell::new("Capabilities").fg(Color::Cyan),
        Cell::new("In use").fg(Color::Cyan),
    ]);

    for model in models {
        table.add_row(vec![
            Cell::new(&model.name),
            Cell::new(format_size(model.size_bytes)),
            Cell::new(format_capabilities(&model.capabilities)),
            Cell::new(in_use(&model.name, config)),
        ]);
    }

    table
}

/// Format capabilities as a compact string.
fn format_capabilities(caps: &Capabilities) -> String {
    let mut parts = Vec::new();
    if caps.chat {
        parts.push("chat");
    }
    if caps.embeddings {
        parts.push("embed");
    }
    if caps.streaming {
        parts.push("stream");
    }
    parts.join(", ")
}

/// Human-readable size (e.g., "1.3 GB").
fn format_size(bytes: Option<u64>) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = MB * 1024.0;

    match bytes {
        None => "-".to_string(),
        Some(b) if b as f64 >= GB => format!("{:.1} GB", b as f64 / GB),
        Some(b) => format!("{:.0} MB", b as f64 / MB),
    }
}

/// Which configured role, if any, a model fills.
///
/// Ollama reports untagged pulls as `name:latest`.
fn in_use(name: &str, config: &QuizzerConfig) -> &'static str {
    let matches = |configured: &str| {
        name == configured || name.strip_suffix(":latest") == Some(configured)
    };
    match (matches(&config.models.chat), matches(&config.models.embedding)) {
        (true, true) => "chat, embedding",
        (true, false) => "chat",
        (false, true) => "embedding",
        (false, false) => "",
    }
}
