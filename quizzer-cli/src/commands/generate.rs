//! Question generation command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use quizzer_core::{Question, QuestionStore, Synthesizer};
use tracing::{debug, warn};

use crate::config::ConfigLoader;
use crate::output;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Document to generate questions from
    #[arg(default_value = "story.txt")]
    pub document: PathBuf,

    /// Where to save the questions
    #[arg(short, long, default_value = "questions.json")]
    pub output: PathBuf,

    /// Five questions per paragraph, each tagged with a topic
    #[arg(long)]
    pub batch: bool,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let synthesizer = super::synthesizer(super::provider(&config), &config, args.batch);
    debug!("Generating with {}", config.models.chat);
    let questions = generate(&synthesizer, &args.document).await?;

    QuestionStore::new(&args.output).save(&questions)?;
    output::print_success(&format!(
        "Saved {} questions to {}",
        questions.len(),
        args.output.display()
    ));
    Ok(())
}

/// Segment `document` and synthesize questions for every paragraph.
pub(crate) async fn generate(synthesizer: &Synthesizer, document: &Path) -> Result<Vec<Question>> {
    let chunks = super::load_chunks(document)?;

    output::print_step(&format!(
        "Generating questions from {} paragraphs...",
        chunks.len()
    ));
    let outcome = synthesizer.synthesize_all(&chunks).await;
    println!("done");

    if !outcome.skipped.is_empty() {
        warn!(
            "{} of {} paragraphs produced no questions",
            outcome.skipped.len(),
            chunks.len()
        );
    }
    Ok(outcome.questions)
}
