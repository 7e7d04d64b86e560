//! Interactive quiz command.
//!
//! Drives a [`QuizSession`] from the terminal: every state is rendered, and
//! the learner's input or the feedback timer is turned into the next event.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use quizzer_core::{
    Error as CoreError, LessonPlanner, Question, QuestionStore, QuizSession, SessionError,
    SessionEvent, SessionState, Synthesizer,
};
use tracing::{info, warn};

use crate::config::ConfigLoader;
use crate::output;

#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Saved questions to quiz on
    #[arg(default_value = "questions.json")]
    pub questions: PathBuf,

    /// Document to generate questions from when none are saved yet
    #[arg(short, long, default_value = "story.txt")]
    pub document: PathBuf,

    /// Lesson and harder follow-up round after misses in the first round
    #[arg(long)]
    pub adaptive: bool,

    /// Feedback display time in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub async fn run(args: QuizArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let provider = super::provider(&config);
    let synthesizer = super::synthesizer(provider.clone(), &config, false);
    let planner = LessonPlanner::new(provider, &config.models.chat);

    let store = QuestionStore::new(&args.questions);
    let questions = load_or_generate(&store, &args.document, &synthesizer).await?;

    let adaptive = args.adaptive || config.quiz.adaptive;
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.quiz.feedback_delay_ms));

    output::print_header(&format!("Quiz: {} questions", questions.len()));
    let mut driver = QuizDriver {
        session: QuizSession::new(questions, adaptive),
        planner,
        synthesizer,
        delay,
        theme: ColorfulTheme::default(),
    };
    driver.run().await
}

/// Saved questions, or freshly generated ones from `document` which are
/// then saved to `store`.
async fn load_or_generate(
    store: &QuestionStore,
    document: &Path,
    synthesizer: &Synthesizer,
) -> Result<Vec<Question>> {
    match store.load() {
        Ok(questions) => Ok(questions),
        Err(CoreError::NotFound(_)) => {
            info!(
                "{} not found, generating from {}",
                store.path().display(),
                document.display()
            );
            let questions = super::generate::generate(synthesizer, document).await?;
            store.save(&questions)?;
            Ok(questions)
        }
        Err(e) => Err(e.into()),
    }
}

/// Event that closes a finished round: the lesson when one is due and could
/// be written, otherwise `Conclude`.
async fn round_end_event(session: &QuizSession, planner: &LessonPlanner) -> SessionEvent {
    if !session.remediation_due() {
        return SessionEvent::Conclude;
    }
    match planner.plan(&session.missed_questions()).await {
        Ok(lesson) => SessionEvent::LessonReady(lesson),
        Err(e) => {
            warn!("Could not prepare a lesson: {}", e);
            SessionEvent::Conclude
        }
    }
}

/// Event after the learner accepts a follow-up round. Ends the quiz when no
/// follow-up question could be generated.
async fn follow_up_event(session: &QuizSession, synthesizer: &Synthesizer) -> SessionEvent {
    let outcome = synthesizer.follow_up(&session.missed_questions()).await;
    if outcome.questions.is_empty() {
        warn!("No follow-up questions could be generated");
        SessionEvent::Conclude
    } else {
        SessionEvent::Continue(outcome.questions)
    }
}

struct QuizDriver {
    session: QuizSession,
    planner: LessonPlanner,
    synthesizer: Synthesizer,
    delay: Duration,
    theme: ColorfulTheme,
}

impl QuizDriver {
    async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();

        loop {
            match self.session.state().clone() {
                SessionState::Presenting { index } => {
                    if let Some(question) = self.session.current_question() {
                        output::print_question_to(
                            &mut stdout,
                            question,
                            index + 1,
                            self.session.round().len(),
                        )?;
                    }
                    self.session.handle(SessionEvent::Displayed)?;
                }

                SessionState::AwaitingAnswer { .. } => {
                    let choice = self.prompt_choice()?;
                    match self.session.handle(SessionEvent::AnswerSubmitted(choice)) {
                        Ok(_) => {}
                        Err(e @ (SessionError::NoAnswerSelected | SessionError::InvalidChoice(_))) => {
                            output::print_error(&e.to_string());
                        }
                        Err(e) => return Err(e.into()),
                    }
                }

                SessionState::Graded { outcome, .. } => {
                    if let Some(question) = self.session.current_question() {
                        output::print_feedback_to(&mut stdout, question, &outcome)?;
                    }
                    tokio::time::sleep(self.delay).await;
                    self.session.handle(SessionEvent::TimerElapsed)?;
                }

                SessionState::RoundComplete => {
                    output::print_round_to(
                        &mut stdout,
                        self.session.round_number(),
                        &self.session.round().score(),
                    )?;
                    self.finish_round().await?;
                }

                SessionState::LessonShown { lesson } => {
                    output::print_lesson_to(&mut stdout, &lesson)?;
                    self.start_follow_up().await?;
                }

                SessionState::QuizComplete => {
                    output::print_summary_to(&mut stdout, &self.session.summary())?;
                    return Ok(());
                }
            }
        }
    }

    /// 1-based choice, or `None` when the prompt is dismissed.
    fn prompt_choice(&self) -> Result<Option<usize>> {
        let Some(question) = self.session.current_question() else {
            return Ok(None);
        };
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Your answer")
            .items(&question.options()[..])
            .interact_opt()?;
        Ok(selection.map(|i| i + 1))
    }

    async fn finish_round(&mut self) -> Result<()> {
        let planning = self.session.remediation_due();
        if planning {
            output::print_step("Preparing a lesson on the missed topics...");
        }
        let event = round_end_event(&self.session, &self.planner).await;
        if planning {
            println!("done");
        }
        self.session.handle(event)?;
        Ok(())
    }

    async fn start_follow_up(&mut self) -> Result<()> {
        let proceed = Confirm::with_theme(&self.theme)
            .with_prompt("Continue to a harder follow-up round?")
            .default(true)
            .interact()?;
        if !proceed {
            self.session.handle(SessionEvent::Conclude)?;
            return Ok(());
        }

        output::print_step("Writing follow-up questions...");
        let event = follow_up_event(&self.session, &self.synthesizer).await;
        println!("done");
        self.session.handle(event)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quizzer_core::AnswerKey;
    use quizzer_models::providers::MockProvider;
    use tempfile::TempDir;

    const REPLY: &str = "Q: Who lit the lamp?\nA) The keeper\nB) The captain\nC) The cook\nD) Nobody\nCorrect Answer: A\n";

    fn question() -> Question {
        Question::new(
            "Who lit the lamp?",
            ["A) The keeper", "B) The captain", "C) The cook", "D) Nobody"],
            AnswerKey::A,
            "The keeper lit the lamp.",
            Some("lighthouse".to_string()),
        )
        .unwrap()
    }

    /// Adaptive session whose only question was answered wrong.
    fn session_with_miss() -> QuizSession {
        let mut session = QuizSession::new(vec![question()], true);
        session.handle(SessionEvent::Displayed).unwrap();
        session.handle(SessionEvent::AnswerSubmitted(Some(2))).unwrap();
        session.handle(SessionEvent::TimerElapsed).unwrap();
        assert_eq!(*session.state(), SessionState::RoundComplete);
        session
    }

    #[tokio::test]
    async fn failed_lesson_concludes_quiz() {
        let mock = Arc::new(MockProvider::new());
        mock.queue_failure("model not found");
        let planner = LessonPlanner::new(mock.clone(), "llama3.2:1b");
        let mut session = session_with_miss();

        let event = round_end_event(&session, &planner).await;

        assert!(matches!(event, SessionEvent::Conclude));
        session.handle(event).unwrap();
        assert!(session.is_complete());
        assert_eq!(mock.chat_calls(), 1);
    }

    #[tokio::test]
    async fn lesson_is_offered_after_a_miss() {
        let mock = Arc::new(MockProvider::with_replies(["Lighthouses guide ships."]));
        let planner = LessonPlanner::new(mock, "llama3.2:1b");
        let mut session = session_with_miss();

        let event = round_end_event(&session, &planner).await;

        assert!(matches!(event, SessionEvent::LessonReady(_)));
        session.handle(event).unwrap();
        assert!(matches!(session.state(), SessionState::LessonShown { .. }));
    }

    #[tokio::test]
    async fn perfect_round_concludes_without_lesson() {
        let mock = Arc::new(MockProvider::new());
        let planner = LessonPlanner::new(mock.clone(), "llama3.2:1b");
        let mut session = QuizSession::new(vec![question()], true);
        session.handle(SessionEvent::Displayed).unwrap();
        session.handle(SessionEvent::AnswerSubmitted(Some(1))).unwrap();
        session.handle(SessionEvent::TimerElapsed).unwrap();

        let event = round_end_event(&session, &planner).await;

        assert!(matches!(event, SessionEvent::Conclude));
        assert_eq!(mock.chat_calls(), 0);
    }

    #[tokio::test]
    async fn empty_follow_up_concludes_quiz() {
        let lesson_mock = Arc::new(MockProvider::with_replies(["Lighthouses guide ships."]));
        let planner = LessonPlanner::new(lesson_mock, "llama3.2:1b");
        let mut session = session_with_miss();
        session
            .handle(round_end_event(&session, &planner).await)
            .unwrap();

        let mock = Arc::new(MockProvider::new());
        mock.queue_failure("model not found");
        let synthesizer = Synthesizer::new(mock, "llama3.2:1b");

        let event = follow_up_event(&session, &synthesizer).await;

        assert!(matches!(event, SessionEvent::Conclude));
        session.handle(event).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.summary().improvement, None);
    }

    #[tokio::test]
    async fn follow_up_questions_start_next_round() {
        let mut session = session_with_miss();
        let planner = LessonPlanner::new(
            Arc::new(MockProvider::with_replies(["Lighthouses guide ships."])),
            "llama3.2:1b",
        );
        session
            .handle(round_end_event(&session, &planner).await)
            .unwrap();
        let synthesizer = Synthesizer::new(Arc::new(MockProvider::with_replies([REPLY])), "llama3.2:1b");

        let event = follow_up_event(&session, &synthesizer).await;

        assert!(matches!(event, SessionEvent::Continue(ref questions) if questions.len() == 1));
        session.handle(event).unwrap();
        assert_eq!(session.round_number(), 2);
    }

    #[tokio::test]
    async fn missing_questions_are_generated_and_saved() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("story.txt");
        std::fs::write(&document, "The keeper lit the lamp.\n").unwrap();
        let store = QuestionStore::new(dir.path().join("questions.json"));
        let mock = Arc::new(MockProvider::with_replies([REPLY]));
        let synthesizer = Synthesizer::new(mock.clone(), "llama3.2:1b");

        let questions = load_or_generate(&store, &document, &synthesizer).await.unwrap();

        assert_eq!(questions.len(), 1);
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), questions);

        let again = load_or_generate(&store, &document, &synthesizer).await.unwrap();
        assert_eq!(again, questions);
        assert_eq!(mock.chat_calls(), 1);
    }
}
