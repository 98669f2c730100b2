//! Static fee table adapter
//!
//! Deterministic quote and balance providers backed by configuration.
//! Used for offline/demo deployments and throughout the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use bridgeopt_types::{
	BalanceProvider, BalanceResult, BalanceSnapshot, BridgeQuote, ChainRegistry, QuoteError,
	QuoteProvider, QuoteRequest, QuoteResult, TokenBalance,
};

/// Quote provider reading from a per-source-chain fee table
///
/// Fees are flat per source chain regardless of amount; a chain absent from
/// the table is unquotable.
#[derive(Debug, Clone, Default)]
pub struct StaticAdapter {
	fees: HashMap<u64, BridgeQuote>,
}

impl StaticAdapter {
	pub fn new(fees: HashMap<u64, BridgeQuote>) -> Self {
		Self { fees }
	}

	/// Fee table used by the original deployment before live quoting
	pub fn with_default_fees() -> Self {
		let mut fees = HashMap::new();
		fees.insert(42161, BridgeQuote::new(1.0, 300, "across")); // Arbitrum
		fees.insert(8453, BridgeQuote::new(0.5, 300, "across")); // Base
		fees.insert(100, BridgeQuote::new(0.1, 300, "omni")); // Gnosis
		fees.insert(81457, BridgeQuote::new(0.2, 300, "stargate")); // Blast
		Self::new(fees)
	}
}

#[async_trait]
impl QuoteProvider for StaticAdapter {
	fn name(&self) -> &str {
		"static"
	}

	async fn get_quote(&self, request: &QuoteRequest) -> QuoteResult<BridgeQuote> {
		debug!(
			"Static quote {} -> {} for {}",
			request.from_chain_id, request.to_chain_id, request.amount
		);

		self.fees
			.get(&request.from_chain_id)
			.cloned()
			.ok_or(QuoteError::Unavailable {
				from_chain: request.from_chain_id,
				to_chain: request.to_chain_id,
				reason: "no fee table entry for source chain".to_string(),
			})
	}

	async fn supported_chains(&self) -> QuoteResult<Vec<u64>> {
		let mut chains: Vec<u64> = self.fees.keys().copied().collect();
		chains.sort_unstable();
		Ok(chains)
	}
}

/// Balance provider reading from configured per-chain balances
///
/// Returns a complete snapshot over the registry: chains without a
/// configured balance carry a zero entry.
#[derive(Debug, Clone)]
pub struct StaticBalances {
	registry: ChainRegistry,
	balances: HashMap<u64, f64>,
}

impl StaticBalances {
	pub fn new(registry: ChainRegistry, balances: HashMap<u64, f64>) -> Self {
		Self { registry, balances }
	}

	/// Demo balances from the original deployment's offline mode
	pub fn with_default_balances(registry: ChainRegistry) -> Self {
		let mut balances = HashMap::new();
		balances.insert(137, 50.0); // Polygon
		balances.insert(42161, 100.0); // Arbitrum
		balances.insert(8453, 80.0); // Base
		balances.insert(100, 25.0); // Gnosis
		balances.insert(81457, 30.0); // Blast
		Self::new(registry, balances)
	}
}

#[async_trait]
impl BalanceProvider for StaticBalances {
	async fn get_all_balances(&self, user_address: &str) -> BalanceResult<BalanceSnapshot> {
		debug!("Serving static balances for {}", user_address);

		let balances = self
			.registry
			.networks()
			.iter()
			.map(|network| {
				let amount = self.balances.get(&network.chain_id).copied().unwrap_or(0.0);
				TokenBalance::new(network.chain_id, &network.name, amount)
			})
			.collect();

		Ok(BalanceSnapshot::new(balances))
	}
}
