//! Provider abstractions for the two external model services.
//!
//! Both providers are modeled as narrow request/response capabilities with
//! no retained state, so the retrieval pipeline can be exercised against
//! fakes without network access.

use crate::types::Result;
use async_trait::async_trait;

pub mod openai;

pub use openai::OpenAIClient;

/// Text-embedding service: an ordered batch of texts in, one fixed-length
/// vector per text out, order preserved.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Chat-completion service: system instruction plus user prompt in,
/// completion text out.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
