//! HTTP adapter for the resonance engine.
//!
//! # Endpoints
//!
//! - `GET  /health`      — Liveness probe
//! - `POST /api/analyze` — Score one prompt/response pair

pub mod routes;

pub use routes::{app_router, AppState};
