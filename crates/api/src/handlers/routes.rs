use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, info, warn};

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use bridgeopt_types::{
	route_cache_key, OptimizeError, RouteRequest, RouteResponse, ValidationError,
};

/// POST /api/v1/routes - Find optimal bridging routes
///
/// Request flow: validate, consult the cache, snapshot balances, optimize,
/// store the result. Business-level failures (insufficient balance, no
/// quotable route) come back as a structured envelope, not an HTTP error.
pub async fn post_routes(
	State(state): State<AppState>,
	Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ErrorResponse>)> {
	info!(
		"Received route request: {} of token {} on chain {}",
		request.amount, request.token_address, request.target_chain
	);

	let optimize_request = request.validate().map_err(|e| {
		let code = match e {
			ValidationError::UnsupportedChain { .. } => StatusCode::BAD_REQUEST,
			_ => StatusCode::UNPROCESSABLE_ENTITY,
		};
		(
			code,
			Json(ErrorResponse::new(
				"VALIDATION_ERROR",
				format!("Invalid request: {}", e),
			)),
		)
	})?;

	if !state.registry.is_supported(optimize_request.target_chain) {
		return Err((
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse::new(
				"UNSUPPORTED_CHAIN",
				format!("Unsupported target chain: {}", request.target_chain),
			)),
		));
	}

	let cache_key = route_cache_key(
		&request.target_chain,
		&request.amount,
		&request.user_address,
	);
	if state.cache_enabled {
		match state.cache.get(&cache_key).await {
			Ok(Some(cached)) => {
				debug!("Cache hit for {}", cache_key);
				return Ok(Json(RouteResponse::success(cached)));
			},
			Ok(None) => {},
			Err(error) => warn!("Cache read failed for {}: {}", cache_key, error),
		}
	}

	let balances = state
		.balance_provider
		.get_all_balances(&request.user_address)
		.await
		.map_err(|e| {
			(
				StatusCode::SERVICE_UNAVAILABLE,
				Json(ErrorResponse::new(
					"BALANCE_UNAVAILABLE",
					format!("Failed to fetch balances: {}", e),
				)),
			)
		})?;

	let result = match state.optimizer.optimize(&optimize_request, &balances).await {
		Ok(result) => result,
		Err(error @ OptimizeError::InsufficientBalance { .. }) => {
			// Structured business failure, not a transport error
			return Ok(Json(RouteResponse::error(error.to_string())));
		},
		Err(OptimizeError::DeadlineExceeded { timeout_ms }) => {
			return Err((
				StatusCode::GATEWAY_TIMEOUT,
				Json(ErrorResponse::new(
					"OPTIMIZATION_TIMEOUT",
					format!("Route search exceeded {}ms deadline", timeout_ms),
				)),
			));
		},
		Err(OptimizeError::Balance(error)) => {
			return Err((
				StatusCode::SERVICE_UNAVAILABLE,
				Json(ErrorResponse::new(
					"BALANCE_UNAVAILABLE",
					format!("Failed to fetch balances: {}", error),
				)),
			));
		},
	};

	if state.cache_enabled {
		if let Err(error) = state
			.cache
			.set(cache_key.clone(), result.clone(), state.cache_ttl_seconds)
			.await
		{
			warn!("Cache write failed for {}: {}", cache_key, error);
		}
	}

	info!(
		"Returning {} routes for chain {} (success: {})",
		result.routes.len(),
		result.target_chain,
		result.success
	);
	Ok(Json(RouteResponse::success(result)))
}
