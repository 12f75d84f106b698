//! # Sourcewell
//!
//! A grounded document Q&A server: questions are answered from a fixed,
//! pre-ingested PDF corpus, with per-claim source attribution (document +
//! page) computed from the retrieval result rather than trusted to the
//! model.
//!
//! ## Overview
//!
//! The corpus is prepared offline in two stages, then served read-only:
//!
//! ```text
//! sourcewell-server ingest   PDFs -> page-anchored chunks -> index.json
//! sourcewell-server embed    index.json -> index.embedded.json
//! sourcewell-server serve    POST /api/ask answers against the index
//! ```
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use sourcewell::{AnswerEngine, Config, Embedder, IndexStore, OpenAIClient};
//! use std::sync::Arc;
//!
//! let config = Config::from_env()?;
//! let client = Arc::new(OpenAIClient::new(&config.openai)?);
//! let engine = AnswerEngine::new(
//!     IndexStore::new(&config.index.index_dir),
//!     Embedder::new(client.clone()),
//!     client,
//! );
//! let answer = engine.answer("How do I wind down before bed?").await?;
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - The retrieval pipeline (chunking, ingestion, embedding,
//!   retrieval, answer orchestration)
//! - [`llm`] - Provider traits and the OpenAI client
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line interface for the server binary
//! - [`types`] - Data model, wire types, and error handling
//! - [`utils`] - Environment-driven configuration

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Model provider clients and abstractions.
pub mod llm;
/// Retrieval-augmented answering pipeline.
pub mod rag;
/// Core types (requests, responses, data model, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{ChatClient, EmbeddingClient, OpenAIClient};
pub use rag::answer::{AnswerEngine, GroundedAnswer};
pub use rag::chunker::TextChunker;
pub use rag::embedder::{BatchPolicy, Embedder};
pub use rag::index::IndexStore;
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Environment-driven configuration
    pub config: Arc<Config>,
    /// The answer orchestrator, shared read-only across requests
    pub engine: Arc<AnswerEngine>,
}
