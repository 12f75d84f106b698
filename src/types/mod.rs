//! Core types: data model, API request/response shapes, and error handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskRequest {
    /// Defaults to empty when absent so a missing question reports the
    /// same validation failure as a blank one.
    #[serde(default)]
    pub question: String,
}

/// Response body for `/api/ask`. Field names are camelCase on the wire to
/// match the persisted index artifact format.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub answer: String,
    pub index_created_at: DateTime<Utc>,
    /// Per-chunk citation details. Only present outside production mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
}

/// One citation per retrieved chunk, computed from the retrieval result
/// rather than parsed out of the model's prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Citation {
    /// Rank label the model was given, e.g. "SOURCE 1".
    pub source: String,
    pub filename: String,
    pub page: u32,
    pub id: String,
    pub score: f32,
}

// ============= Index Data Model =============

/// A page-anchored slice of document text, the unit of retrieval.
///
/// Chunk identity is deterministic: the same corpus always produces the
/// same ids, pages, and chunk indexes. Re-ingestion is a full rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub id: String,
    pub doc_id: String,
    pub filename: String,
    /// 1-based page number from the source document.
    pub page: u32,
    /// 0-based position within this page's chunk list.
    pub chunk_index: u32,
    pub text: String,
    /// Empty until the offline embedding stage has run; the raw index
    /// artifact omits the field entirely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Builds the stable chunk id, e.g. `guide::p3::c1`.
    pub fn make_id(doc_id: &str, page: u32, chunk_index: u32) -> String {
        format!("{}::p{}::c{}", doc_id, page, chunk_index)
    }
}

/// The persisted corpus: embedded chunks plus a build timestamp.
///
/// A value type, owned by the index store and read-only everywhere else.
/// "Update" means building a new value and replacing the artifact wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagIndex {
    pub created_at: DateTime<Utc>,
    pub chunks: Vec<Chunk>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Ingestion(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Embedding(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::IndexNotFound(msg) => (axum::http::StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Llm(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::Io(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_id_is_deterministic() {
        assert_eq!(Chunk::make_id("sleep", 1, 0), "sleep::p1::c0");
        assert_eq!(Chunk::make_id("sleep", 12, 3), "sleep::p12::c3");
    }

    #[test]
    fn raw_chunk_omits_embedding_field() {
        let chunk = Chunk {
            id: Chunk::make_id("doc", 1, 0),
            doc_id: "doc".into(),
            filename: "doc.pdf".into(),
            page: 1,
            chunk_index: 0,
            text: "hello".into(),
            embedding: Vec::new(),
        };
        let json = serde_json::to_value(&chunk).unwrap();
        assert!(json.get("embedding").is_none());
        assert_eq!(json["docId"], "doc");
        assert_eq!(json["chunkIndex"], 0);
    }

    #[test]
    fn embedded_chunk_round_trips() {
        let chunk = Chunk {
            id: Chunk::make_id("doc", 2, 1),
            doc_id: "doc".into(),
            filename: "doc.pdf".into(),
            page: 2,
            chunk_index: 1,
            text: "hello".into(),
            embedding: vec![0.25, -0.5],
        };
        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }
}
