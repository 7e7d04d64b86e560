//! LLM gateway for quizzer.
//!
//! This crate provides:
//! - The [`providers::ModelProvider`] trait: chat completion, streaming chat,
//!   and text embeddings behind one interface
//! - An Ollama provider talking to a local Ollama server over HTTP
//! - A scripted [`providers::MockProvider`] for tests and offline runs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              quizzer-core pipeline            │
//! │   synthesizer · embedding store · assistant   │
//! └──────────────────────────────────────────────┘
//!                        │ &dyn ModelProvider
//!                        ▼
//! ┌─────────────────────┐   ┌─────────────────────┐
//! │   OllamaProvider    │   │    MockProvider     │
//! │ /api/chat           │   │ queued replies,     │
//! │ /api/embeddings     │   │ deterministic       │
//! │ /api/tags           │   │ embeddings          │
//! └─────────────────────┘   └─────────────────────┘
//! ```

mod error;
mod types;

pub mod providers;

pub use error::{Error, Result};
pub use types::{Capabilities, ModelId, ModelInfo};
