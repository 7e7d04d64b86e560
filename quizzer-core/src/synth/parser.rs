//! Line-oriented parser for model-written question blocks.
//!
//! The reply is tokenized line by line, then fed through a two-state
//! machine (`Idle`, `Accumulating`). The accepted layout is:
//!
//! ```text
//! Q1: Which planet is largest?        (or "Q: ...")
//! A) Mars
//! B) Jupiter
//! C) Venus
//! D) Mercury
//! Correct Answer: B
//! Topic: Planets                      (optional)
//! ```
//!
//! Markdown bold markers (`**`) are ignored. Any structural deviation fails
//! the whole reply; no partial record is ever returned.

use crate::question::AnswerKey;
use crate::{Error, Result};

const ANSWER_MARKER: &str = "correct answer:";
const TOPIC_MARKER: &str = "topic:";

/// A question block that passed structural checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub text: String,
    /// Labeled options in A–D order, e.g. `"A) Mars"`.
    pub options: Vec<String>,
    pub answer: AnswerKey,
    pub topic: Option<String>,
}

/// One classified reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Question(String),
    Option(AnswerKey, String),
    /// `None` when no A–D letter follows the marker.
    Answer(Option<AnswerKey>),
    Topic(String),
    Text(String),
    Blank,
}

fn tokenize(line: &str) -> Token {
    let cleaned = line.replace("**", "");
    let line = cleaned.trim();
    if line.is_empty() {
        return Token::Blank;
    }

    if let Some(rest) = question_body(line) {
        return Token::Question(rest.trim().to_string());
    }

    let mut chars = line.chars();
    if let (Some(letter), Some(')')) = (chars.next(), chars.next())
        && letter.is_ascii_uppercase()
        && let Some(key) = AnswerKey::from_letter(letter)
    {
        return Token::Option(key, format!("{}) {}", key, chars.as_str().trim()));
    }

    let lower = line.to_ascii_lowercase();
    if let Some(pos) = lower.find(ANSWER_MARKER) {
        let after = &line[pos + ANSWER_MARKER.len()..];
        let key = after
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .and_then(AnswerKey::from_letter);
        return Token::Answer(key);
    }
    if let Some(pos) = lower.find(TOPIC_MARKER) {
        return Token::Topic(line[pos + TOPIC_MARKER.len()..].trim().to_string());
    }

    Token::Text(line.to_string())
}

/// Body after a `Q:` or `Q<number>:` marker.
fn question_body(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('Q')?;
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    rest[digits..].strip_prefix(':')
}

#[derive(Debug, Default)]
struct Draft {
    text: String,
    options: Vec<String>,
    answer: Option<AnswerKey>,
    topic: Option<String>,
}

impl Draft {
    fn new(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    fn finish(self, ordinal: usize) -> Result<ParsedQuestion> {
        if self.text.is_empty() {
            return Err(malformed(ordinal, "question text is empty"));
        }
        if self.options.len() != 4 {
            return Err(malformed(
                ordinal,
                &format!("expected 4 options, found {}", self.options.len()),
            ));
        }
        let answer = self
            .answer
            .ok_or_else(|| malformed(ordinal, "no correct answer"))?;

        Ok(ParsedQuestion {
            text: self.text,
            options: self.options,
            answer,
            topic: self.topic.filter(|t| !t.is_empty()),
        })
    }
}

enum State {
    Idle,
    Accumulating(Draft),
}

fn malformed(ordinal: usize, detail: &str) -> Error {
    Error::MalformedResponse(format!("question {ordinal}: {detail}"))
}

/// Parse a full model reply into question blocks.
///
/// Fails with [`Error::MalformedResponse`] when any block is incomplete or
/// out of order, or when the reply holds no question at all. A `Topic:` line
/// seen before the first question applies to every question without its own.
pub fn parse_reply(reply: &str) -> Result<Vec<ParsedQuestion>> {
    let mut parsed = Vec::new();
    let mut shared_topic: Option<String> = None;
    let mut state = State::Idle;

    for line in reply.lines() {
        state = match (state, tokenize(line)) {
            (State::Idle, Token::Question(text)) => State::Accumulating(Draft::new(text)),
            (State::Accumulating(draft), Token::Question(text)) => {
                parsed.push(draft.finish(parsed.len() + 1)?);
                State::Accumulating(Draft::new(text))
            }

            (State::Idle, Token::Option(key, _)) => {
                return Err(Error::MalformedResponse(format!(
                    "option {key}) appears before any question"
                )));
            }
            (State::Accumulating(mut draft), Token::Option(key, option)) => {
                let ordinal = parsed.len() + 1;
                match AnswerKey::ALL.get(draft.options.len()) {
                    Some(expected) if *expected == key => draft.options.push(option),
                    Some(expected) => {
                        return Err(malformed(
                            ordinal,
                            &format!("option {key}) where {expected}) was expected"),
                        ));
                    }
                    None => return Err(malformed(ordinal, "more than 4 options")),
                }
                State::Accumulating(draft)
            }

            (State::Idle, Token::Answer(_)) => {
                return Err(Error::MalformedResponse(
                    "correct answer appears before any question".to_string(),
                ));
            }
            (State::Accumulating(mut draft), Token::Answer(key)) => {
                let ordinal = parsed.len() + 1;
                if draft.answer.is_some() {
                    return Err(malformed(ordinal, "more than one correct answer"));
                }
                let key = key.ok_or_else(|| {
                    malformed(ordinal, "correct answer is not one of A, B, C or D")
                })?;
                draft.answer = Some(key);
                State::Accumulating(draft)
            }

            (State::Idle, Token::Topic(topic)) => {
                shared_topic = Some(topic);
                State::Idle
            }
            (State::Accumulating(mut draft), Token::Topic(topic)) => {
                draft.topic = Some(topic);
                State::Accumulating(draft)
            }

            // Continuation lines extend the prompt until options begin
            (State::Accumulating(mut draft), Token::Text(text))
                if draft.options.is_empty() && draft.answer.is_none() =>
            {
                if draft.text.is_empty() {
                    draft.text = text;
                } else {
                    draft.text.push(' ');
                    draft.text.push_str(&text);
                }
                State::Accumulating(draft)
            }

            (state, Token::Text(_) | Token::Blank) => state,
        };
    }

    if let State::Accumulating(draft) = state {
        parsed.push(draft.finish(parsed.len() + 1)?);
    }

    if parsed.is_empty() {
        return Err(Error::MalformedResponse(
            "reply contains no question".to_string(),
        ));
    }

    if let Some(topic) = shared_topic.filter(|t| !t.is_empty()) {
        for question in parsed.iter_mut().filter(|q| q.topic.is_none()) {
            question.topic = Some(topic.clone());
        }
    }

    Ok(parsed)
}
