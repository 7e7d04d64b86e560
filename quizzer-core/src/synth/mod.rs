//! Question synthesis from source text.
//!
//! A [`Synthesizer`] sends one chunk of source text to the chat model with a
//! fixed instruction, parses the reply with [`parse_reply`], and builds
//! validated [`Question`]s. When the layout asks for topics and the reply
//! carries none, a second request fetches a topic label for the chunk.

mod parser;
pub mod prompts;

use std::sync::Arc;

use quizzer_models::providers::{ChatRequest, Message, ModelProvider};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lesson::missed_topics;
use crate::question::Question;
use crate::{Error, Result};

pub use parser::{ParsedQuestion, parse_reply};

/// How many questions to request per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionLayout {
    /// One question, no topic.
    #[default]
    Single,
    /// Five questions, each tagged with a topic.
    Batch,
}

impl QuestionLayout {
    pub fn expected_questions(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Batch => 5,
        }
    }

    pub fn wants_topics(self) -> bool {
        matches!(self, Self::Batch)
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Single => prompts::SINGLE_QUESTION,
            Self::Batch => prompts::FIVE_QUESTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Standard,
    /// Inference-level questions for follow-up rounds.
    Harder,
}

/// Questions gathered across many chunks.
#[derive(Debug, Default)]
pub struct SynthesisOutcome {
    pub questions: Vec<Question>,
    /// Indices of chunks that produced no questions.
    pub skipped: Vec<usize>,
}

/// Turns source text into quiz questions via the chat model.
pub struct Synthesizer {
    provider: Arc<dyn ModelProvider>,
    model: String,
    layout: QuestionLayout,
    difficulty: Difficulty,
}

impl Synthesizer {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            layout: QuestionLayout::default(),
            difficulty: Difficulty::default(),
        }
    }

    pub fn layout(mut self, layout: QuestionLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Same provider and model, different difficulty.
    pub fn with_difficulty(&self, difficulty: Difficulty) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            model: self.model.clone(),
            layout: self.layout,
            difficulty,
        }
    }

    /// Synthesize questions for one piece of source text.
    ///
    /// `hint_topics` steer the questions and, joined, serve as the topic of
    /// any question the model leaves untagged. Fails with
    /// [`Error::MalformedResponse`] if the reply deviates from the layout
    /// and [`Error::Gateway`] if the chat call fails.
    pub async fn synthesize(&self, source_text: &str, hint_topics: &[String]) -> Result<Vec<Question>> {
        let reply = self
            .chat(self.system_prompt(), self.user_prompt(source_text, hint_topics))
            .await?;
        let parsed = parse_reply(&reply)?;

        if parsed.len() != self.layout.expected_questions() {
            debug!(
                "Requested {} questions, model wrote {}",
                self.layout.expected_questions(),
                parsed.len()
            );
        }

        let fallback_topic = if !hint_topics.is_empty() {
            Some(hint_topics.join(", "))
        } else if self.layout.wants_topics() && parsed.iter().any(|q| q.topic.is_none()) {
            self.fetch_topic(source_text).await?
        } else {
            None
        };

        parsed
            .into_iter()
            .map(|q| {
                let topic = q.topic.or_else(|| fallback_topic.clone());
                Question::new(q.text, q.options, q.answer, source_text, topic).map_err(|e| match e {
                    Error::InvalidQuestion(detail) => Error::MalformedResponse(detail),
                    other => other,
                })
            })
            .collect()
    }

    /// Synthesize over every chunk, logging and skipping failed chunks.
    pub async fn synthesize_all(&self, chunks: &[String]) -> SynthesisOutcome {
        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        self.synthesize_each(&texts, &[]).await
    }

    /// Harder questions over the source contexts of `missed`, steered by
    /// their topics. Each distinct context is sent once.
    pub async fn follow_up(&self, missed: &[Question]) -> SynthesisOutcome {
        let topics = missed_topics(missed);
        let mut contexts: Vec<&str> = Vec::new();
        for context in missed.iter().map(Question::context) {
            if !context.is_empty() && !contexts.contains(&context) {
                contexts.push(context);
            }
        }

        self.with_difficulty(Difficulty::Harder)
            .synthesize_each(&contexts, &topics)
            .await
    }

    async fn synthesize_each(&self, texts: &[&str], hint_topics: &[String]) -> SynthesisOutcome {
        let mut outcome = SynthesisOutcome::default();

        for (index, text) in texts.iter().enumerate() {
            match self.synthesize(text, hint_topics).await {
                Ok(questions) => {
                    debug!("Chunk {} produced {} questions", index, questions.len());
                    outcome.questions.extend(questions);
                }
                Err(e) => {
                    warn!("Skipping chunk {}: {}", index, e);
                    outcome.skipped.push(index);
                }
            }
        }

        outcome
    }

    /// Ask the model for a short topic label.
    pub async fn fetch_topic(&self, source_text: &str) -> Result<Option<String>> {
        let reply = self
            .chat(prompts::TOPIC_LABEL.to_string(), source_text.to_string())
            .await?;
        Ok(clean_topic(&reply))
    }

    fn system_prompt(&self) -> String {
        let mut prompt = self.layout.instruction().to_string();
        if self.difficulty == Difficulty::Harder {
            prompt.push_str(prompts::HARDER);
        }
        prompt
    }

    fn user_prompt(&self, source_text: &str, hint_topics: &[String]) -> String {
        if hint_topics.is_empty() {
            format!("Text:\n{source_text}")
        } else {
            format!(
                "Focus on these topics: {}\n\nText:\n{source_text}",
                hint_topics.join(", ")
            )
        }
    }

    async fn chat(&self, system: String, user: String) -> Result<String> {
        let request = ChatRequest::new(&self.model, vec![Message::system(system), Message::user(user)]);
        Ok(self.provider.chat(request).await?.content)
    }
}

/// First non-empty line of a topic reply, without label or quotes.
fn clean_topic(reply: &str) -> Option<String> {
    let line = reply.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.replace("**", "");
    let line = match line.to_ascii_lowercase().find("topic:") {
        Some(pos) => line[pos + "topic:".len()..].to_string(),
        None => line,
    };
    let topic = line
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '.')
        .trim();
    (!topic.is_empty()).then(|| topic.to_string())
}
