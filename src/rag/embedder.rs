//! Batched embedding of chunk text.
//!
//! The offline job embeds the whole corpus through the provider in bounded
//! batches with a pause between them. The pause is deliberate throughput
//! throttling against provider rate limits, configured as policy so tests
//! can disable it.

use crate::llm::EmbeddingClient;
use crate::types::{AppError, RagIndex, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BatchPolicy {
    /// Maximum texts per provider request.
    pub batch_size: usize,
    /// Pause inserted between consecutive batches.
    pub batch_delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: 64,
            batch_delay: Duration::from_millis(150),
        }
    }
}

pub struct Embedder {
    client: Arc<dyn EmbeddingClient>,
    policy: BatchPolicy,
}

impl Embedder {
    pub fn new(client: Arc<dyn EmbeddingClient>) -> Self {
        Self::with_policy(client, BatchPolicy::default())
    }

    pub fn with_policy(client: Arc<dyn EmbeddingClient>, policy: BatchPolicy) -> Self {
        Self { client, policy }
    }

    /// Embeds every text, in order, one vector per input. Any batch failure
    /// or count mismatch aborts the whole run; nothing partial is returned.
    pub async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for (batch_no, batch) in texts.chunks(self.policy.batch_size.max(1)).enumerate() {
            if batch_no > 0 && !self.policy.batch_delay.is_zero() {
                tokio::time::sleep(self.policy.batch_delay).await;
            }

            let batch_vectors = self.client.embed_batch(batch).await?;
            if batch_vectors.len() != batch.len() {
                return Err(AppError::Embedding(format!(
                    "provider returned {} embeddings for a batch of {}",
                    batch_vectors.len(),
                    batch.len()
                )));
            }

            tracing::debug!(
                batch = batch_no,
                size = batch.len(),
                done = vectors.len() + batch.len(),
                total = texts.len(),
                "embedded batch"
            );
            vectors.extend(batch_vectors);
        }

        Ok(vectors)
    }

    /// The single-text query path: one string in, exactly one vector out.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.client.embed_batch(&[text.to_string()]).await?;
        if vectors.len() != 1 {
            return Err(AppError::Embedding(format!(
                "provider returned {} embeddings for the query",
                vectors.len()
            )));
        }
        Ok(vectors.remove(0))
    }

    /// Embeds every chunk of a raw index and stamps the build time. The
    /// returned value is a complete replacement; on any failure the caller
    /// gets an error and no index to persist.
    pub async fn embed_index(&self, index: RagIndex) -> Result<RagIndex> {
        let texts: Vec<String> = index.chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embed_texts(&texts).await?;

        let mut chunks = index.chunks;
        for (chunk, embedding) in chunks.iter_mut().zip(vectors) {
            chunk.embedding = embedding;
        }

        Ok(RagIndex {
            created_at: Utc::now(),
            chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Embeds each text as a one-element vector of its length; optionally
    /// short-changes one batch to simulate a provider miscount.
    struct FakeEmbeddings {
        batch_sizes: Mutex<Vec<usize>>,
        drop_from_batch: Option<usize>,
    }

    impl FakeEmbeddings {
        fn new() -> Self {
            Self {
                batch_sizes: Mutex::new(Vec::new()),
                drop_from_batch: None,
            }
        }

        fn miscounting(batch: usize) -> Self {
            Self {
                batch_sizes: Mutex::new(Vec::new()),
                drop_from_batch: Some(batch),
            }
        }
    }

    #[async_trait]
    impl EmbeddingClient for FakeEmbeddings {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut sizes = self.batch_sizes.lock().unwrap();
            let batch_no = sizes.len();
            sizes.push(texts.len());

            let mut out: Vec<Vec<f32>> =
                texts.iter().map(|t| vec![t.len() as f32]).collect();
            if self.drop_from_batch == Some(batch_no) {
                out.pop();
            }
            Ok(out)
        }
    }

    fn no_delay() -> BatchPolicy {
        BatchPolicy {
            batch_size: 4,
            batch_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn batches_are_bounded_and_order_preserved() {
        let client = Arc::new(FakeEmbeddings::new());
        let embedder = Embedder::with_policy(client.clone(), no_delay());

        let texts: Vec<String> = (1..=10).map(|n| "x".repeat(n)).collect();
        let vectors = embedder.embed_texts(&texts).await.unwrap();

        assert_eq!(vectors.len(), 10);
        for (n, vector) in vectors.iter().enumerate() {
            assert_eq!(vector, &vec![(n + 1) as f32]);
        }
        assert_eq!(*client.batch_sizes.lock().unwrap(), vec![4, 4, 2]);
    }

    #[tokio::test]
    async fn count_mismatch_aborts_the_run() {
        let client = Arc::new(FakeEmbeddings::miscounting(1));
        let embedder = Embedder::with_policy(client, no_delay());

        let texts: Vec<String> = (0..8).map(|n| format!("text {}", n)).collect();
        match embedder.embed_texts(&texts).await {
            Err(AppError::Embedding(msg)) => assert!(msg.contains("3 embeddings")),
            other => panic!("expected Embedding error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[tokio::test]
    async fn query_path_returns_exactly_one_vector() {
        let client = Arc::new(FakeEmbeddings::new());
        let embedder = Embedder::with_policy(client, no_delay());

        let vector = embedder.embed_query("bed").await.unwrap();
        assert_eq!(vector, vec![3.0]);
    }

    #[tokio::test]
    async fn query_path_rejects_empty_response() {
        let client = Arc::new(FakeEmbeddings::miscounting(0));
        let embedder = Embedder::with_policy(client, no_delay());

        assert!(matches!(
            embedder.embed_query("bed").await,
            Err(AppError::Embedding(_))
        ));
    }

    #[tokio::test]
    async fn embed_index_fills_every_chunk_and_stamps_time() {
        let client = Arc::new(FakeEmbeddings::new());
        let embedder = Embedder::with_policy(client, no_delay());

        let before = Utc::now();
        let raw = RagIndex {
            created_at: before,
            chunks: (0..3)
                .map(|i| Chunk {
                    id: Chunk::make_id("doc", 1, i),
                    doc_id: "doc".into(),
                    filename: "doc.pdf".into(),
                    page: 1,
                    chunk_index: i,
                    text: "y".repeat(i as usize + 1),
                    embedding: Vec::new(),
                })
                .collect(),
        };

        let embedded = embedder.embed_index(raw).await.unwrap();
        assert!(embedded.created_at >= before);
        for (i, chunk) in embedded.chunks.iter().enumerate() {
            assert_eq!(chunk.embedding, vec![(i + 1) as f32]);
        }
    }
}
