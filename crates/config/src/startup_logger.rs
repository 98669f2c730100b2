//! Startup summary logging

use tracing::info;

use crate::Settings;

/// Log the effective configuration at startup
///
/// Secrets are never logged; the API key is reported only by the name of
/// the environment variable it is read from.
pub fn log_startup(settings: &Settings) {
	info!(
		"Server listening on {}:{}",
		settings.server.host, settings.server.port
	);
	info!(
		"Supported chains: {}",
		settings
			.chain_registry()
			.networks()
			.iter()
			.map(|n| format!("{} ({})", n.name, n.chain_id))
			.collect::<Vec<_>>()
			.join(", ")
	);
	info!(
		"Quote provider: {} (endpoint {}, api key from ${})",
		settings.provider.kind.as_str(),
		settings.provider.endpoint,
		settings.provider.api_key_env
	);
	info!(
		"Optimizer: max {} splits, max {} routes, weights fee {} / time {}, \
		 per-quote timeout {}ms, global timeout {}ms",
		settings.optimizer.max_splits,
		settings.optimizer.max_routes,
		settings.optimizer.fee_weight,
		settings.optimizer.time_weight,
		settings.optimizer.per_quote_timeout_ms,
		settings.optimizer.global_timeout_ms
	);
	if settings.cache.enabled {
		info!("Result cache enabled, TTL {}s", settings.cache.ttl_seconds);
	} else {
		info!("Result cache disabled");
	}
}
