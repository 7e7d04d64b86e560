//! Remediation lessons built from missed questions.

use std::sync::Arc;

use quizzer_models::providers::{ChatRequest, Message, ModelProvider};
use tracing::debug;

use crate::Result;
use crate::question::Question;
use crate::synth::prompts;

/// Longest excerpt of source context quoted per topic.
const EXCERPT_CHARS: usize = 600;

/// A short lesson covering the topics a learner missed. Display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    topics: Vec<String>,
    text: String,
}

impl Lesson {
    pub fn new(topics: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            topics,
            text: text.into(),
        }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Topics of `missed`, first occurrence first.
///
/// A question without a topic contributes its own text instead.
pub fn missed_topics(missed: &[Question]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for question in missed {
        let topic = question.topic().unwrap_or(question.text());
        if !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
    }
    topics
}

/// Writes lessons through the chat model.
pub struct LessonPlanner {
    provider: Arc<dyn ModelProvider>,
    model: String,
}

impl LessonPlanner {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// One chat call producing a lesson on the missed topics.
    pub async fn plan(&self, missed: &[Question]) -> Result<Lesson> {
        let topics = missed_topics(missed);
        debug!("Planning lesson on {} topics", topics.len());

        let request = ChatRequest::new(
            &self.model,
            vec![
                Message::system(prompts::LESSON),
                Message::user(lesson_prompt(&topics, missed)),
            ],
        );
        let response = self.provider.chat(request).await?;

        Ok(Lesson::new(topics, response.content.trim()))
    }
}

fn lesson_prompt(topics: &[String], missed: &[Question]) -> String {
    let mut prompt = format!("Topics: {}\n", topics.join(", "));

    let mut quoted: Vec<&str> = Vec::new();
    for context in missed.iter().map(Question::context) {
        if context.is_empty() || quoted.contains(&context) {
            continue;
        }
        quoted.push(context);
        let excerpt: String = context.chars().take(EXCERPT_CHARS).collect();
        prompt.push_str("\nExcerpt:\n");
        prompt.push_str(&excerpt);
        prompt.push('\n');
    }

    prompt
}
