use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
	pub status: String,
	pub cache_healthy: bool,
	pub quote_provider_healthy: bool,
}

/// GET /ready - Readiness probe with cache and quote-provider checks
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let cache_healthy = state.cache.health_check().await.unwrap_or(false);
	let quote_provider_healthy = state.quote_provider.health_check().await.unwrap_or(false);

	let overall = cache_healthy && quote_provider_healthy;
	let status = if overall { "ready" } else { "degraded" };

	let body = ReadinessResponse {
		status: status.to_string(),
		cache_healthy,
		quote_provider_healthy,
	};
	let code = if overall {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};
	(code, Json(body))
}
