//! Grounded answer orchestration.
//!
//! Ties the online pipeline together: validate the question, load the
//! immutable index, embed the query, retrieve the top chunks, and ask the
//! chat model to answer from those excerpts only. Citations are computed
//! from the retrieval result itself, never parsed out of the model's
//! prose, so they stay correct even when the model cites sloppily.

use crate::llm::ChatClient;
use crate::rag::embedder::Embedder;
use crate::rag::index::IndexStore;
use crate::rag::retriever::{retrieve_top_k, ScoredChunk};
use crate::types::{AppError, Citation, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Default number of chunks handed to the model.
pub const DEFAULT_TOP_K: usize = 6;

/// Governing instruction for every completion. Enforces grounded-only
/// claims, a fixed five-part response shape, and a fixed insufficiency
/// sentence when the excerpts cannot support an answer.
pub const SYSTEM_PROMPT: &str = "\
You are Sourcewell - a calm, practical, research-grounded assistant (educational only).

Hard rules:
- Use ONLY the provided sources for factual claims.
- Do NOT diagnose. Do NOT mention disorders unless the sources explicitly mention them.
- If the sources don't support an answer, say: \"I don't have enough information in the provided PDFs to answer that.\"

Write style:
- Plain language. Warm, concise. No lecture tone.
- Max ~220 words unless the user asks for detail.
- Prefer 3-5 highly actionable steps over long lists.

Required structure (use these headings):
1) Summary (1-2 sentences)
2) Try this first (3-5 bullets max)
3) Why this helps (1 short paragraph)
4) If it keeps happening (1-2 sentences)
5) Sources (list filenames + pages; no inline [SOURCE X] brackets)

Citations:
- Do NOT use [SOURCE 1] in the body.
- In \"Sources\", list the specific PDFs + page numbers you relied on (e.g., \"importance_of_sleep.pdf (p.2-3)\").";

/// The structured result of one answered question.
#[derive(Debug)]
pub struct GroundedAnswer {
    /// The model's text, returned verbatim. An explicit statement of
    /// insufficiency is a valid answer, not an error.
    pub text: String,
    pub citations: Vec<Citation>,
    pub index_created_at: DateTime<Utc>,
}

pub struct AnswerEngine {
    store: IndexStore,
    embedder: Embedder,
    chat: Arc<dyn ChatClient>,
    top_k: usize,
}

impl AnswerEngine {
    pub fn new(store: IndexStore, embedder: Embedder, chat: Arc<dyn ChatClient>) -> Self {
        Self {
            store,
            embedder,
            chat,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub async fn answer(&self, question: &str) -> Result<GroundedAnswer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::InvalidInput("Missing question".into()));
        }

        // Index first: a missing index is an operator problem and should
        // surface before any provider round trip.
        let index = self.store.load()?;

        let query = self.embedder.embed_query(question).await?;
        let top = retrieve_top_k(&query, &index.chunks, self.top_k);

        let prompt = build_prompt(question, &top);
        let text = self.chat.generate_with_system(SYSTEM_PROMPT, &prompt).await?;

        tracing::info!(
            model = self.chat.model_name(),
            sources = top.len(),
            top_score = top.first().map(|s| s.score as f64).unwrap_or(0.0),
            "answered question"
        );

        Ok(GroundedAnswer {
            text,
            citations: citations_for(&top),
            index_created_at: index.created_at,
        })
    }
}

/// Builds the user message: the question, a short citable source list, and
/// the full excerpt block the model reads from.
fn build_prompt(question: &str, top: &[ScoredChunk<'_>]) -> String {
    let source_list = top
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "SOURCE {}: {} (p.{})",
                i + 1,
                s.chunk.filename,
                s.chunk.page
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let excerpts = top
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "SOURCE {}\nFILENAME: {}\nPAGE: {}\nTEXT:\n{}",
                i + 1,
                s.chunk.filename,
                s.chunk.page,
                s.chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "Question: {}\n\nAvailable sources:\n{}\n\nSource excerpts:\n{}",
        question, source_list, excerpts
    )
}

/// One citation per retrieved chunk, rank-labeled in retrieval order.
fn citations_for(top: &[ScoredChunk<'_>]) -> Vec<Citation> {
    top.iter()
        .enumerate()
        .map(|(i, s)| Citation {
            source: format!("SOURCE {}", i + 1),
            filename: s.chunk.filename.clone(),
            page: s.chunk.page,
            id: s.chunk.id.clone(),
            score: s.score,
        })
        .collect()
}
