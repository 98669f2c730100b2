//! Bridge Optimizer Adapters
//!
//! Quote and balance provider implementations: a live Socket aggregator
//! client and a static fee table, selected by configuration.

use std::collections::HashMap;
use std::sync::Arc;

use bridgeopt_types::{BridgeQuote, ChainRegistry, QuoteError, QuoteProvider, QuoteResult};

pub mod socket_adapter;
pub mod static_adapter;

pub use socket_adapter::SocketAdapter;
pub use static_adapter::{StaticAdapter, StaticBalances};

/// Factory for creating quote providers from configuration
pub struct AdapterFactory;

impl AdapterFactory {
	pub fn create_quote_provider(
		kind: &str,
		endpoint: String,
		api_key: Option<String>,
		timeout_ms: u64,
		registry: ChainRegistry,
		static_fees: HashMap<u64, BridgeQuote>,
	) -> QuoteResult<Arc<dyn QuoteProvider>> {
		match kind {
			"socket-v2" => {
				let api_key = api_key.ok_or(QuoteError::MissingApiKey)?;
				Ok(Arc::new(SocketAdapter::new(
					endpoint, api_key, timeout_ms, registry,
				)?))
			},
			"static" => Ok(Arc::new(StaticAdapter::new(static_fees))),
			other => Err(QuoteError::UnsupportedProvider(other.to_string())),
		}
	}
}
