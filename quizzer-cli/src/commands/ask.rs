//! Reading assistant command.
//!
//! Answers questions about a document, using its most similar paragraphs as
//! context. Runs once with `--question`, otherwise prompts until an empty
//! line.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dialoguer::{Input, theme::ColorfulTheme};
use quizzer_core::{Assistant, DocumentId, EmbeddingStore, format_exchange};
use tokio_stream::StreamExt;

use crate::config::ConfigLoader;
use crate::output;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Document to answer questions about
    #[arg(default_value = "story.txt")]
    pub document: PathBuf,

    /// Ask a single question and exit
    #[arg(short, long)]
    pub question: Option<String>,

    /// Paragraphs retrieved as context (overrides config)
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Append each exchange to this file
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

pub async fn run(args: AskArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let chunks = super::load_chunks(&args.document)?;
    let doc = DocumentId::for_path(&args.document, &chunks);
    let store = EmbeddingStore::new(
        config.storage.embeddings_dir(),
        config.models.embedding_id(),
    );

    output::print_step(&format!("Loading {}...", doc.name()));
    let assistant = Assistant::load(
        super::provider(&config),
        &config.models.chat,
        store,
        &doc,
        chunks,
    )
    .await?
    .top_k(args.top_k.unwrap_or(config.rag.top_k));
    println!("ready");

    if let Some(question) = args.question {
        let answer = answer(&assistant, &question).await?;
        return record(args.transcript.as_ref(), &question, &answer);
    }

    let theme = ColorfulTheme::default();
    loop {
        let question: String = Input::with_theme(&theme)
            .with_prompt("Question (empty to quit)")
            .allow_empty(true)
            .interact_text()?;
        if question.trim().is_empty() {
            break;
        }

        match answer(&assistant, &question).await {
            Ok(answer) => record(args.transcript.as_ref(), &question, &answer)?,
            Err(e) => output::print_error(&e.to_string()),
        }
    }

    Ok(())
}

/// Stream the answer to stdout and return it whole.
async fn answer(assistant: &Assistant, question: &str) -> Result<String> {
    let mut stream = assistant.ask_stream(question).await?;
    let mut stdout = io::stdout();
    let mut answer = String::new();

    while let Some(chunk) = stream.next().await {
        if let Some(delta) = chunk?.delta {
            write!(stdout, "{delta}")?;
            stdout.flush()?;
            answer.push_str(&delta);
        }
    }
    writeln!(stdout)?;

    Ok(answer)
}

fn record(transcript: Option<&PathBuf>, question: &str, answer: &str) -> Result<()> {
    let Some(path) = transcript else {
        return Ok(());
    };
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_exchange(question, answer).as_bytes())?;
    Ok(())
}
