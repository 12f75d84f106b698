//! HTTP API handlers and routes, built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `POST /api/ask` - Answer a question from the indexed corpus
//! - `GET /api/health` - Health check endpoint
//!
//! Every response body is structured JSON, including failures: errors are
//! rendered as `{"error": "<message>"}` with the status mapped from the
//! error taxonomy (400 for bad input, 503 for a missing index, 502 for
//! provider failures).

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
