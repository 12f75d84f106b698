//! Shared test fixtures: mock provider clients with call counters, plus
//! config and index builders.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sourcewell::types::{AppError, Chunk, RagIndex, Result};
use sourcewell::utils::config::{Config, IndexConfig, OpenAIConfig, RagConfig, ServerConfig};
use sourcewell::{ChatClient, EmbeddingClient};
use std::sync::atomic::{AtomicUsize, Ordering};

// ============= Mock Provider Clients =============

/// Mock embedding client returning a fixed vector per input text.
pub struct MockEmbeddings {
    calls: AtomicUsize,
    vector: Vec<f32>,
    should_fail: bool,
    short_change: bool,
}

impl MockEmbeddings {
    pub fn returning(vector: Vec<f32>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            vector,
            should_fail: false,
            short_change: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            vector: Vec::new(),
            should_fail: true,
            short_change: false,
        }
    }

    /// Returns one vector fewer than requested, simulating a provider
    /// miscount.
    pub fn short_changing(vector: Vec<f32>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            vector,
            should_fail: false,
            short_change: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::Embedding("mock embedding failure".into()));
        }
        let mut vectors: Vec<Vec<f32>> = texts.iter().map(|_| self.vector.clone()).collect();
        if self.short_change {
            vectors.pop();
        }
        Ok(vectors)
    }
}

/// Mock chat client with a canned response.
pub struct MockChat {
    calls: AtomicUsize,
    response: String,
    should_fail: bool,
}

impl MockChat {
    pub fn new(response: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: response.to_string(),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: String::new(),
            should_fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for MockChat {
    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::Llm("mock chat failure".into()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}

// ============= Fixture Builders =============

pub fn chunk(doc_id: &str, page: u32, chunk_index: u32, text: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: Chunk::make_id(doc_id, page, chunk_index),
        doc_id: doc_id.to_string(),
        filename: format!("{}.pdf", doc_id),
        page,
        chunk_index,
        text: text.to_string(),
        embedding,
    }
}

pub fn index_with(chunks: Vec<Chunk>, created_at: DateTime<Utc>) -> RagIndex {
    RagIndex { created_at, chunks }
}

pub fn test_config(index_dir: &str, production: bool) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            production,
        },
        openai: OpenAIConfig {
            api_key: None,
            api_base: "https://api.openai.com/v1".into(),
            embedding_model: "text-embedding-3-small".into(),
            chat_model: "gpt-4o-mini".into(),
            temperature: 0.2,
            request_timeout_secs: 60,
        },
        rag: RagConfig {
            chunk_size: 1200,
            chunk_overlap: 200,
            top_k: 6,
            embed_batch_size: 64,
            embed_batch_delay_ms: 0,
        },
        index: IndexConfig {
            documents_dir: "data/pdfs".into(),
            index_dir: index_dir.into(),
        },
    }
}
