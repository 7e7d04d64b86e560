//! Quiz session state machine
//!
//! A [`QuizSession`] owns the current round and moves through
//! [`SessionState`]s in response to discrete [`SessionEvent`]s from the
//! front end (question displayed, answer submitted, feedback timer elapsed,
//! lesson ready, continue, conclude). Presentation never mutates session
//! state directly.
//!
//! ```text
//! Presenting(i) --Displayed--> AwaitingAnswer(i) --AnswerSubmitted--> Graded(i)
//!      ^                                                                |
//!      +------------------------TimerElapsed (i+1 < len)----------------+
//!                                                                       |
//!                                     TimerElapsed (i+1 == len)         v
//! QuizComplete <--Conclude-- RoundComplete --LessonReady--> LessonShown
//!                                                               |
//!                                    Presenting(0) <--Continue--+
//! ```

use std::fmt;

use tracing::debug;

use crate::error::SessionError;
use crate::lesson::Lesson;
use crate::question::{AnswerKey, Question};

/// Result of grading one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeOutcome {
    pub correct: bool,
    pub selected: AnswerKey,
    pub expected: AnswerKey,
}

/// State of a quiz session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Question `index` is about to be shown
    Presenting { index: usize },
    /// Question `index` is shown, waiting for a choice
    AwaitingAnswer { index: usize },
    /// Feedback for question `index` is on screen
    Graded { index: usize, outcome: GradeOutcome },
    /// Every question of the round has been graded
    RoundComplete,
    /// A remediation lesson is on screen
    LessonShown { lesson: Lesson },
    /// Terminal
    QuizComplete,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Presenting { .. } => "Presenting",
            Self::AwaitingAnswer { .. } => "AwaitingAnswer",
            Self::Graded { .. } => "Graded",
            Self::RoundComplete => "RoundComplete",
            Self::LessonShown { .. } => "LessonShown",
            Self::QuizComplete => "QuizComplete",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presenting { index } | Self::AwaitingAnswer { index } | Self::Graded { index, .. } => {
                write!(f, "{}({})", self.name(), index)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Events that drive the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The current question is on screen.
    Displayed,
    /// The learner submitted a 1-based choice, or none.
    AnswerSubmitted(Option<usize>),
    /// The feedback delay has passed.
    TimerElapsed,
    /// A remediation lesson is available.
    LessonReady(Lesson),
    /// Start the follow-up round with these questions.
    Continue(Vec<Question>),
    /// End the quiz.
    Conclude,
}

impl SessionEvent {
    /// State(s) in which this event is accepted.
    fn expected_state(&self) -> &'static str {
        match self {
            Self::Displayed => "Presenting",
            Self::AnswerSubmitted(_) => "AwaitingAnswer",
            Self::TimerElapsed => "Graded",
            Self::LessonReady(_) => "RoundComplete",
            Self::Continue(_) => "LessonShown",
            Self::Conclude => "RoundComplete or LessonShown",
        }
    }
}

/// Correct answers out of questions asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundScore {
    pub correct: usize,
    pub total: usize,
}

impl RoundScore {
    /// Percentage correct; an empty round scores 0%.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for RoundScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.correct, self.total, self.percent())
    }
}

/// The questions of one round with its running score.
#[derive(Debug, Clone, Default)]
pub struct QuizRound {
    questions: Vec<Question>,
    correct: usize,
    missed: Vec<usize>,
}

impl QuizRound {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            correct: 0,
            missed: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> RoundScore {
        RoundScore {
            correct: self.correct,
            total: self.questions.len(),
        }
    }

    /// Indices of missed questions, in answer order.
    pub fn missed(&self) -> &[usize] {
        &self.missed
    }
}

/// Cumulative results once the quiz is over.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub rounds: Vec<RoundScore>,
    /// Percentage points gained from the first to the last round.
    pub improvement: Option<f64>,
}

/// Quiz session driven by [`SessionEvent`]s.
pub struct QuizSession {
    round: QuizRound,
    round_number: usize,
    history: Vec<RoundScore>,
    remediation: bool,
    state: SessionState,
}

impl QuizSession {
    /// Start a session. With `remediation` enabled, misses in the first
    /// round lead to a lesson and a follow-up round.
    pub fn new(questions: Vec<Question>, remediation: bool) -> Self {
        let mut session = Self {
            round: QuizRound::new(questions),
            round_number: 1,
            history: Vec::new(),
            remediation,
            state: SessionState::Presenting { index: 0 },
        };
        if session.round.is_empty() {
            session.complete_round();
        }
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn round(&self) -> &QuizRound {
        &self.round
    }

    /// 1-based number of the current round.
    pub fn round_number(&self) -> usize {
        self.round_number
    }

    /// Question being presented, answered, or graded.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Presenting { index }
            | SessionState::AwaitingAnswer { index }
            | SessionState::Graded { index, .. } => self.round.questions.get(index),
            _ => None,
        }
    }

    /// Questions missed in the current round.
    pub fn missed_questions(&self) -> Vec<Question> {
        self.round
            .missed
            .iter()
            .filter_map(|&i| self.round.questions.get(i).cloned())
            .collect()
    }

    /// Whether the finished first round calls for a lesson.
    pub fn remediation_due(&self) -> bool {
        self.remediation && self.round_number == 1 && !self.round.missed.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::QuizComplete
    }

    /// Scores of every finished round plus first-to-last improvement.
    pub fn summary(&self) -> QuizSummary {
        let improvement = match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) if self.history.len() > 1 => {
                Some(last.percent() - first.percent())
            }
            _ => None,
        };
        QuizSummary {
            rounds: self.history.clone(),
            improvement,
        }
    }

    /// Apply an event, returning the new state.
    ///
    /// An event that does not fit the current state is rejected with
    /// [`SessionError::InvalidState`] and leaves the session untouched, as
    /// do the validation errors for a missing or out-of-range choice.
    pub fn handle(&mut self, event: SessionEvent) -> Result<&SessionState, SessionError> {
        let next = match (self.state.clone(), event) {
            (SessionState::Presenting { index }, SessionEvent::Displayed) => {
                SessionState::AwaitingAnswer { index }
            }

            (SessionState::AwaitingAnswer { .. }, SessionEvent::AnswerSubmitted(None)) => {
                return Err(SessionError::NoAnswerSelected);
            }
            (SessionState::AwaitingAnswer { index }, SessionEvent::AnswerSubmitted(Some(choice))) => {
                let selected =
                    AnswerKey::from_position(choice).ok_or(SessionError::InvalidChoice(choice))?;
                self.grade(index, selected)
            }

            (SessionState::Graded { index, .. }, SessionEvent::TimerElapsed) => {
                let next = index + 1;
                if next == self.round.len() {
                    self.complete_round();
                    return Ok(&self.state);
                }
                SessionState::Presenting { index: next }
            }

            (SessionState::RoundComplete, SessionEvent::LessonReady(lesson))
                if self.remediation_due() =>
            {
                SessionState::LessonShown { lesson }
            }

            (SessionState::LessonShown { .. }, SessionEvent::Continue(questions)) => {
                if questions.is_empty() {
                    return Err(SessionError::EmptyRound);
                }
                self.round = QuizRound::new(questions);
                self.round_number += 1;
                debug!(
                    "Starting round {} with {} questions",
                    self.round_number,
                    self.round.len()
                );
                SessionState::Presenting { index: 0 }
            }

            (SessionState::RoundComplete | SessionState::LessonShown { .. }, SessionEvent::Conclude) => {
                SessionState::QuizComplete
            }

            (state, event) => {
                return Err(SessionError::InvalidState {
                    expected: event.expected_state().to_string(),
                    actual: state.to_string(),
                });
            }
        };

        self.state = next;
        Ok(&self.state)
    }

    fn grade(&mut self, index: usize, selected: AnswerKey) -> SessionState {
        let expected = self
            .round
            .questions
            .get(index)
            .map(Question::correct_answer)
            .unwrap_or(AnswerKey::A);
        let correct = selected == expected;

        if correct {
            self.round.correct += 1;
        } else {
            self.round.missed.push(index);
        }

        SessionState::Graded {
            index,
            outcome: GradeOutcome {
                correct,
                selected,
                expected,
            },
        }
    }

    fn complete_round(&mut self) {
        let score = self.round.score();
        debug!("Round {} complete: {}", self.round_number, score);
        self.history.push(score);
        self.state = SessionState::RoundComplete;
    }
}
