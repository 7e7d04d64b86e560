//! Multiple-choice question records.
//!
//! A [`Question`] is validated once at construction and again whenever it is
//! deserialized, so every value in circulation holds exactly four options
//! labeled A–D and an answer key among them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One of the four option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    /// All labels in display order.
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    /// Parse a label letter, ignoring case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    /// Label for a 1-based display position (A=1 .. D=4).
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// 1-based display position.
    pub fn position(self) -> usize {
        self.index() + 1
    }

    /// 0-based index into the options array.
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// The `X)` prefix options carry.
    pub fn marker(self) -> String {
        format!("{})", self.letter())
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    text: String,
    options: [String; 4],
    correct_answer: AnswerKey,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
}

impl Question {
    /// Build a question, rejecting anything that breaks the invariants.
    ///
    /// Options are stored as displayed (`"A) Paris"`) and must carry their
    /// labels in A–D order. An empty topic is treated as absent.
    pub fn new<I, S>(
        text: impl Into<String>,
        options: I,
        correct_answer: AnswerKey,
        context: impl Into<String>,
        topic: Option<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(Error::InvalidQuestion("question text is empty".to_string()));
        }

        let options: Vec<String> = options
            .into_iter()
            .map(|o| o.into().trim().to_string())
            .collect();
        let options: [String; 4] = options.try_into().map_err(|v: Vec<String>| {
            Error::InvalidQuestion(format!("expected 4 options, got {}", v.len()))
        })?;

        for (key, option) in AnswerKey::ALL.iter().zip(options.iter()) {
            let Some(body) = option.strip_prefix(&key.marker()) else {
                return Err(Error::InvalidQuestion(format!(
                    "option {} is not labeled '{}': {option:?}",
                    key.position(),
                    key.marker()
                )));
            };
            if body.trim().is_empty() {
                return Err(Error::InvalidQuestion(format!("option {key} is empty")));
            }
        }

        let topic = topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            text,
            options,
            correct_answer,
            context: context.into(),
            topic,
        })
    }

    /// Prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options as displayed, labels included.
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    /// Option body without its `X)` label.
    pub fn option_text(&self, key: AnswerKey) -> &str {
        let option = &self.options[key.index()];
        option
            .get(2..)
            .map(str::trim)
            .unwrap_or(option.as_str())
    }

    pub fn correct_answer(&self) -> AnswerKey {
        self.correct_answer
    }

    /// Source text the question was derived from.
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Grade a 1-based option choice (A=1 .. D=4).
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer.position()
    }
}

/// Unvalidated wire form of [`Question`].
#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    options: Vec<String>,
    correct_answer: String,
    context: String,
    #[serde(default)]
    topic: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = Error;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        let mut letters = raw.correct_answer.trim().chars();
        let key = match (letters.next(), letters.next()) {
            (Some(c), None) => AnswerKey::from_letter(c),
            _ => None,
        }
        .ok_or_else(|| {
            Error::InvalidQuestion(format!(
                "correct_answer must be one of A-D, got {:?}",
                raw.correct_answer
            ))
        })?;

        Question::new(raw.text, raw.options, key, raw.context, raw.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [&'static str; 4] {
        ["A) Paris", "B) Rome", "C) Berlin", "D) Madrid"]
    }

    #[test]
    fn answer_key_positions_are_one_based() {
        assert_eq!(AnswerKey::A.position(), 1);
        assert_eq!(AnswerKey::D.position(), 4);
        assert_eq!(AnswerKey::from_position(2), Some(AnswerKey::B));
        assert_eq!(AnswerKey::from_position(0), None);
        assert_eq!(AnswerKey::from_position(5), None);
    }

    #[test]
    fn answer_key_from_letter_ignores_case() {
        assert_eq!(AnswerKey::from_letter('c'), Some(AnswerKey::C));
        assert_eq!(AnswerKey::from_letter('E'), None);
    }

    #[test]
    fn new_accepts_valid_question() {
        let q = Question::new("Capital of France?", options(), AnswerKey::A, "ctx", None).unwrap();
        assert_eq!(q.text(), "Capital of France?");
        assert_eq!(q.option_text(AnswerKey::B), "Rome");
        assert!(q.is_correct(1));
        assert!(!q.is_correct(2));
        assert!(q.topic().is_none());
    }

    #[test]
    fn new_rejects_wrong_option_count() {
        let err = Question::new("?", ["A) x", "B) y", "C) z"], AnswerKey::A, "", None).unwrap_err();
        assert!(err.to_string().contains("expected 4 options, got 3"));
    }

    #[test]
    fn new_rejects_mislabeled_options() {
        let err = Question::new(
            "?",
            ["A) x", "C) y", "B) z", "D) w"],
            AnswerKey::A,
            "",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidQuestion(_)));
    }

    #[test]
    fn new_rejects_empty_text_and_empty_option() {
        assert!(Question::new("  ", options(), AnswerKey::A, "", None).is_err());
        assert!(
            Question::new("?", ["A) x", "B)  ", "C) z", "D) w"], AnswerKey::A, "", None).is_err()
        );
    }

    #[test]
    fn blank_topic_is_dropped() {
        let q = Question::new("?", options(), AnswerKey::A, "", Some("  ".into())).unwrap();
        assert!(q.topic().is_none());
    }

    #[test]
    fn serializes_expected_shape() {
        let q = Question::new("?", options(), AnswerKey::C, "ctx", Some("Geography".into()))
            .unwrap();
        let json = serde_json::to_value(&q).unwrap();

        assert_eq!(json["correct_answer"], "C");
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
        assert_eq!(json["topic"], "Geography");
        assert_eq!(json["context"], "ctx");
    }

    #[test]
    fn topic_is_omitted_when_absent() {
        let q = Question::new("?", options(), AnswerKey::C, "ctx", None).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert!(!json.contains("topic"));
    }

    #[test]
    fn deserialize_validates_answer() {
        let json = r#"{"text":"?","options":["A) a","B) b","C) c","D) d"],"correct_answer":"E","context":""}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());

        let json = r#"{"text":"?","options":["A) a","B) b","C) c","D) d"],"correct_answer":"b","context":""}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer(), AnswerKey::B);
    }
}
