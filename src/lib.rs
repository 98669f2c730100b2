//! Bridge Optimizer Library
//!
//! Finds how a required token amount should be sourced across chains:
//! which subset of source chains to draw from, how much from each, and
//! which combination minimizes the blended fee/time cost.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types - the most commonly used types
pub use bridgeopt_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Primary domain entities
	BalanceSnapshot,
	BridgeQuote,
	ChainRegistry,
	Network,
	OptimizeRequest,
	QuoteRequest,
	Route,
	RouteOptimization,
	RouteRequest,
	RouteResponse,
	RouteStep,
	TokenBalance,
	// Error types
	BalanceError,
	OptimizeError,
	QuoteError,
	StorageError,
	ValidationError,
	// Provider and cache seams
	BalanceProvider,
	QuoteProvider,
	RouteCache,
};

// Service layer
pub use bridgeopt_service::{
	combinations, score, CostWeights, OptimizerConfig, RouteOptimizerService,
};

// Storage layer
pub use bridgeopt_storage::{route_cache_key, MemoryStore};

// API layer
pub use bridgeopt_api::{create_router, AppState};

// Adapters
pub use bridgeopt_adapters::{AdapterFactory, SocketAdapter, StaticAdapter, StaticBalances};

// Config
pub use bridgeopt_config::{load_config, log_startup, LogFormat, ProviderKind, Settings};

// Module aliases for advanced usage
pub mod types {
	pub use bridgeopt_types::*;
}

pub mod service {
	pub use bridgeopt_service::*;
}

pub mod storage {
	pub use bridgeopt_storage::*;
}

pub mod adapters {
	pub use bridgeopt_adapters::*;
}

pub mod api {
	pub use bridgeopt_api::*;
}

pub mod config {
	pub use bridgeopt_config::*;
}

pub mod mocks;

/// Initialize the tracing subscriber from logging settings
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(settings: &Settings) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));
	let builder = tracing_subscriber::fmt().with_env_filter(filter);

	match settings.logging.format {
		LogFormat::Json => builder.json().init(),
		LogFormat::Pretty => builder.pretty().init(),
		LogFormat::Compact => builder.compact().init(),
	}
}

/// Builder pattern for configuring the optimizer service
///
/// Providers and cache default from settings; each can be replaced with a
/// custom implementation for embedding or testing.
pub struct OptimizerBuilder {
	settings: Settings,
	quote_provider: Option<Arc<dyn QuoteProvider>>,
	balance_provider: Option<Arc<dyn BalanceProvider>>,
	cache: Option<Arc<dyn RouteCache>>,
}

impl Default for OptimizerBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl OptimizerBuilder {
	pub fn new() -> Self {
		Self {
			settings: Settings::default(),
			quote_provider: None,
			balance_provider: None,
			cache: None,
		}
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = settings;
		self
	}

	pub fn with_quote_provider(mut self, provider: Arc<dyn QuoteProvider>) -> Self {
		self.quote_provider = Some(provider);
		self
	}

	pub fn with_balance_provider(mut self, provider: Arc<dyn BalanceProvider>) -> Self {
		self.balance_provider = Some(provider);
		self
	}

	pub fn with_cache(mut self, cache: Arc<dyn RouteCache>) -> Self {
		self.cache = Some(cache);
		self
	}

	/// Assemble the application: router plus shared state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings;
		let registry = settings.chain_registry();

		let (quote_provider, balance_provider) =
			match (self.quote_provider, self.balance_provider) {
				(Some(quote), Some(balance)) => (quote, balance),
				(quote, balance) => {
					let (default_quote, default_balance) =
						default_providers(&settings, &registry)?;
					(
						quote.unwrap_or(default_quote),
						balance.unwrap_or(default_balance),
					)
				},
			};

		let cache: Arc<dyn RouteCache> = match self.cache {
			Some(cache) => cache,
			None => {
				let store = MemoryStore::new();
				let _cleanup = store.start_ttl_cleanup();
				Arc::new(store)
			},
		};

		let optimizer_config = OptimizerConfig {
			max_splits: settings.optimizer.max_splits,
			max_routes: settings.optimizer.max_routes,
			weights: CostWeights {
				fee_weight: settings.optimizer.fee_weight,
				time_weight: settings.optimizer.time_weight,
			},
			per_quote_timeout_ms: settings.optimizer.per_quote_timeout_ms,
			global_timeout_ms: settings.optimizer.global_timeout_ms,
			max_concurrent_quotes: settings.optimizer.max_concurrent_quotes,
		};
		let optimizer = Arc::new(RouteOptimizerService::new(
			Arc::clone(&quote_provider),
			optimizer_config,
		));

		let state = AppState {
			optimizer,
			balance_provider,
			quote_provider,
			cache,
			registry: Arc::new(registry),
			cache_enabled: settings.cache.enabled,
			cache_ttl_seconds: settings.cache.ttl_seconds,
		};
		let router = create_router().with_state(state.clone());

		Ok((router, state))
	}

	/// Start the complete HTTP server and block until shutdown
	pub async fn start_server(self) -> Result<(), Box<dyn std::error::Error>> {
		let settings = self.settings.clone();
		log_startup(&settings);

		let (router, _state) = self.start().await?;

		let addr: SocketAddr =
			format!("{}:{}", settings.server.host, settings.server.port).parse()?;
		let listener = tokio::net::TcpListener::bind(addr).await?;
		info!("Bridge optimizer listening on {}", addr);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

/// Build the provider pair selected by configuration
fn default_providers(
	settings: &Settings,
	registry: &ChainRegistry,
) -> Result<(Arc<dyn QuoteProvider>, Arc<dyn BalanceProvider>), Box<dyn std::error::Error>> {
	match settings.provider.kind {
		ProviderKind::SocketV2 => {
			let api_key = settings
				.provider
				.api_key()
				.ok_or(QuoteError::MissingApiKey)?;
			// One client implements both seams
			let adapter = Arc::new(SocketAdapter::new(
				settings.provider.endpoint.clone(),
				api_key,
				settings.provider.request_timeout_ms,
				registry.clone(),
			)?);
			let quote: Arc<dyn QuoteProvider> = adapter.clone();
			let balance: Arc<dyn BalanceProvider> = adapter;
			Ok((quote, balance))
		},
		ProviderKind::Static => {
			let fees = settings.provider.fee_table();
			let quote: Arc<dyn QuoteProvider> = if fees.is_empty() {
				Arc::new(StaticAdapter::with_default_fees())
			} else {
				Arc::new(StaticAdapter::new(fees))
			};
			let balances = settings.provider.balance_table();
			let balance: Arc<dyn BalanceProvider> = if balances.is_empty() {
				Arc::new(StaticBalances::with_default_balances(registry.clone()))
			} else {
				Arc::new(StaticBalances::new(registry.clone(), balances))
			};
			Ok((quote, balance))
		},
	}
}
