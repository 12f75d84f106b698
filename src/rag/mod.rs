//! Retrieval-augmented answering pipeline.
//!
//! # Module Structure
//!
//! - [`chunker`] - Character-window text chunking with overlap
//! - [`ingest`] - PDF directory ingestion into page-anchored chunks
//! - [`embedder`] - Batched, rate-paced embedding via the provider
//! - [`index`] - Persisted index artifacts with atomic replacement
//! - [`retriever`] - Exhaustive cosine-similarity top-K retrieval
//! - [`answer`] - Grounded prompt construction and citation extraction
//!
//! # Pipeline
//!
//! Offline, once per corpus change:
//!
//! 1. **Ingest** - PDFs are split into per-page, overlapping chunks
//! 2. **Embed** - chunk text becomes fixed-length vectors, batch by batch
//! 3. **Persist** - the embedded index replaces the prior artifact wholesale
//!
//! Online, per question:
//!
//! 1. Embed the question
//! 2. Rank every indexed chunk by cosine similarity, keep the top K
//! 3. Ask the chat model to answer from those excerpts only
//! 4. Return the text with citations computed from the retrieved set

pub mod answer;
pub mod chunker;
pub mod embedder;
pub mod index;
pub mod ingest;
pub mod retriever;
