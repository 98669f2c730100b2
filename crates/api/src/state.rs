use std::sync::Arc;

use bridgeopt_service::RouteOptimizerService;
use bridgeopt_types::{BalanceProvider, ChainRegistry, QuoteProvider, RouteCache};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub optimizer: Arc<RouteOptimizerService>,
	pub balance_provider: Arc<dyn BalanceProvider>,
	pub quote_provider: Arc<dyn QuoteProvider>,
	pub cache: Arc<dyn RouteCache>,
	pub registry: Arc<ChainRegistry>,
	pub cache_enabled: bool,
	pub cache_ttl_seconds: u64,
}
