//! HTTP/REST API layer for Recall Stack.
//!
//! Axum-based API exposing `POST /log`, `GET /recall` and `GET /health`.

pub mod error;
pub mod handlers;
pub mod router;
