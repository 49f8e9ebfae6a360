//! Axum route handlers for the resonance HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`      — Returns `{"status": "ok", "version": .., "service": "resonance"}`
//! - `POST /api/analyze` — Accepts `AnalysisRequest`, returns `AnalysisReport`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::ResonanceEngine;
use crate::report::AnalysisReport;
use crate::types::AnalysisRequest;

/// Shared application state for the HTTP server.
#[derive(Clone, Debug)]
pub struct AppState {
    /// One engine shared by every request.
    pub engine: Arc<ResonanceEngine>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            engine: Arc::new(ResonanceEngine::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "resonance",
    }))
}

/// Successful `/api/analyze` body.
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    success: bool,
    #[serde(flatten)]
    report: AnalysisReport,
    timestamp: String,
}

type ErrorResponse = (StatusCode, Json<Value>);

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "error": message.into(),
        })),
    )
}

/// POST /api/analyze — score one prompt/response pair.
///
/// Request:  `{ "user_prompt": str, "ai_response": str, "options": { "detailed_analysis": bool } }`
/// Response: `{ "success": true, ..AnalysisReport, "timestamp": rfc3339 }`
///
/// Malformed JSON, missing fields and a blank prompt are rejected with 400
/// and `{ "success": false, "error": .. }`.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ErrorResponse> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected analyze request: {}", rejection.body_text());
        bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    if request
        .user_prompt
        .as_deref()
        .is_some_and(|prompt| prompt.trim().is_empty())
    {
        return Err(bad_request("Please provide a user prompt"));
    }

    let result = state
        .engine
        .analyze_request(request)
        .map_err(|e| bad_request(e.to_string()))?;

    tracing::info!(
        resonance_index = result.resonance_index,
        archetype = %result.intent.archetype,
        "Analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        report: result.to_report(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(body: String) -> (StatusCode, Value) {
        let app = app_router(AppState::new());
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app_router(AppState::new());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::VERSION);
        assert_eq!(json["service"], "resonance");
    }

    #[tokio::test]
    async fn test_analyze_returns_report() {
        let body = serde_json::json!({
            "user_prompt": "Let's design the cache together. What do you think?",
            "ai_response": "Think of it as a pantry. We can start with an LRU policy. Does this make sense?",
        });
        let (status, json) = post_json(body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["user_intent_pattern"]["detected"], "co_creation_partner");
        assert!(json["resonance_index"].as_f64().unwrap() <= 1.0);
        assert!(json["dimension_scores"]["cai"].is_number());
        assert!(json["timestamp"].is_string());
        assert!(json.get("detailed_analysis").is_none());
    }

    #[tokio::test]
    async fn test_analyze_detailed_analysis() {
        let body = serde_json::json!({
            "user_prompt": "Explain what a mutex is.",
            "ai_response": "A mutex is like a bathroom key: one holder at a time.",
            "options": { "detailed_analysis": true },
        });
        let (status, json) = post_json(body.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let lines = json["detailed_analysis"]["interpretation"].as_array().unwrap();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].as_str().unwrap().starts_with("IAI: "));
        assert!(json["detailed_analysis"]["component_breakdown"]["css"]["label"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_prompt() {
        let body = serde_json::json!({ "user_prompt": "   ", "ai_response": "hello" });
        let (status, json) = post_json(body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Please provide a user prompt");
    }

    #[tokio::test]
    async fn test_analyze_rejects_missing_response() {
        let body = serde_json::json!({ "user_prompt": "hello" });
        let (status, json) = post_json(body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid input: ai_response is required");
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_json() {
        let (status, json) = post_json("{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
    }
}
