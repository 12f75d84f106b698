//! Question-answering endpoint.

use crate::{
    types::{AskRequest, AskResponse, Result},
    AppState,
};
use axum::{extract::State, Json};
use std::time::Instant;

/// Answer a question from the indexed corpus.
///
/// The model's text comes back verbatim; an explicit statement that the
/// sources are insufficient is still a 200. Citation details are included
/// only outside production mode.
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Grounded answer", body = AskResponse),
        (status = 400, description = "Missing or blank question"),
        (status = 502, description = "Provider call failed"),
        (status = 503, description = "Index not built yet")
    ),
    tag = "ask"
)]
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    let answer = state.engine.answer(&payload.question).await?;

    let citations = if state.config.server.production {
        None
    } else {
        Some(answer.citations)
    };

    tracing::info!(
        duration_ms = start.elapsed().as_millis() as u64,
        "ask completed"
    );

    Ok(Json(AskResponse {
        answer: answer.text,
        index_created_at: answer.index_created_at,
        citations,
    }))
}
