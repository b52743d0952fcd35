//! HTTP request handlers for the assistant service.
//!
//! Implements the chat, emergency-number and health check endpoints using axum.

use crate::config::GeocodeConfig;
use crate::emergency::{lookup_number, resolve_country, EmergencyInfo};
use axum::{
    extract::{Query as QueryParams, State},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use hmh_domain::traits::PageFetcher;
use hmh_domain::Query;
use hmh_synthesizer::HealthAssistant;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Shared application state
pub struct AppState<F: PageFetcher> {
    /// Answers chat messages
    pub assistant: Arc<HealthAssistant<F>>,
    /// Outbound fetcher for reverse geocoding
    pub fetcher: Arc<F>,
    /// Reverse-geocoding settings
    pub geocode: Arc<GeocodeConfig>,
}

impl<F: PageFetcher> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            assistant: Arc::clone(&self.assistant),
            fetcher: Arc::clone(&self.fetcher),
            geocode: Arc::clone(&self.geocode),
        }
    }
}

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    #[serde(default)]
    pub message: String,
}

/// Emergency lookup query parameters
#[derive(Debug, Deserialize)]
pub struct EmergencyParams {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the process is serving
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// POST /api/chat - Answer one health question
///
/// Always 200: an empty message gets an error body, anything else an answer.
async fn chat<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(query) = Query::parse(&request.message) else {
        return Json(ErrorResponse {
            error: "Missing message".to_string(),
        })
        .into_response();
    };

    let response = state.assistant.answer(&query).await;
    info!(steps = response.steps.len(), sources = response.sources.len(), "Chat answered");
    Json(response).into_response()
}

/// GET /api/emergency - Emergency number for a location
async fn emergency<F: PageFetcher + 'static>(
    State(state): State<AppState<F>>,
    QueryParams(params): QueryParams<EmergencyParams>,
) -> Json<EmergencyInfo> {
    let resolved = resolve_country(state.fetcher.as_ref(), &state.geocode, params.lat, params.lon).await;
    Json(lookup_number(resolved))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<F: PageFetcher + 'static>(state: AppState<F>) -> AxumRouter {
    AxumRouter::new()
        .route("/api/chat", post(chat::<F>))
        .route("/api/emergency", get(emergency::<F>))
        .route("/health", get(health_check))
        .with_state(state)
}
