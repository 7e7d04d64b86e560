//! quizzer-core: reading-assistant and quiz pipeline
//!
//! This crate provides the data pipeline behind quizzer:
//!
//! - **Segmentation** - [`segment`] splits a document into paragraph chunks
//! - **Embeddings** - [`EmbeddingStore`] caches chunk vectors per document and model
//! - **Ranking** - [`rank`] and [`top_k`] order chunks by cosine similarity
//! - **Synthesis** - [`Synthesizer`] asks the chat model for multiple-choice questions
//! - **Persistence** - [`QuestionStore`] saves and loads question sets as JSON
//! - **Sessions** - [`QuizSession`] is the quiz state machine
//! - **Remediation** - [`LessonPlanner`] writes a lesson on missed topics
//! - **Reading assistant** - [`Assistant`] answers questions about a document
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use quizzer_core::{QuestionStore, Synthesizer, segment_file};
//! use quizzer_models::providers::OllamaProvider;
//!
//! async fn example() -> quizzer_core::Result<()> {
//!     let chunks = segment_file(Path::new("story.txt"))?;
//!     let synthesizer = Synthesizer::new(Arc::new(OllamaProvider::new()), "llama3.2:1b");
//!
//!     let outcome = synthesizer.synthesize_all(&chunks).await;
//!     QuestionStore::new("questions.json").save(&outcome.questions)?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! document ──segment──▶ chunks ─┬─▶ EmbeddingStore ──▶ rank ──▶ Assistant
//!                               │
//!                               └─▶ Synthesizer ──▶ QuestionStore ──▶ QuizSession
//!                                                                         │
//!                                                   LessonPlanner ◀───────┘
//! ```

pub mod assistant;
pub mod embeddings;
pub mod error;
pub mod hash;
pub mod lesson;
pub mod question;
pub mod rank;
pub mod segment;
pub mod session;
pub mod store;
pub mod synth;

// Re-export key types for convenience
pub use assistant::{Assistant, DEFAULT_TOP_K, format_exchange};
pub use embeddings::{DocumentId, EmbeddingStore};
pub use error::{Error, Result, SessionError};
pub use hash::ContentHash;
pub use lesson::{Lesson, LessonPlanner, missed_topics};
pub use question::{AnswerKey, Question};
pub use rank::{Ranked, cosine_similarity, rank, top_k};
pub use segment::{read_document, segment, segment_file};
pub use session::{
    GradeOutcome, QuizRound, QuizSession, QuizSummary, RoundScore, SessionEvent, SessionState,
};
pub use store::{QuestionStore, load_json, save_json};
pub use synth::{Difficulty, ParsedQuestion, QuestionLayout, SynthesisOutcome, Synthesizer, parse_reply};
