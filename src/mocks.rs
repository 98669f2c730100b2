//! Mock providers for examples and testing
//!
//! Simple, working providers with call tracking, failure simulation and
//! configurable response delays, usable without external dependencies.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use bridgeopt_types::{
	BalanceError, BalanceProvider, BalanceResult, BalanceSnapshot, BridgeQuote, ChainRegistry,
	QuoteError, QuoteProvider, QuoteRequest, QuoteResult, TokenBalance,
};

/// Mock quote provider backed by a per-chain fee table
///
/// Provides call tracking for cache tests, failure injection per chain and
/// an optional response delay for timeout testing.
#[derive(Debug, Clone)]
pub struct MockQuoteProvider {
	fees: HashMap<u64, BridgeQuote>,
	failing_chains: HashSet<u64>,
	response_delay_ms: u64,
	call_tracker: Arc<AtomicUsize>,
}

impl Default for MockQuoteProvider {
	fn default() -> Self {
		Self::new()
	}
}

impl MockQuoteProvider {
	/// Fee table matching the documented test scenarios
	pub fn new() -> Self {
		let mut fees = HashMap::new();
		fees.insert(42161, BridgeQuote::new(1.0, 300, "across")); // Arbitrum
		fees.insert(8453, BridgeQuote::new(0.5, 300, "across")); // Base
		fees.insert(100, BridgeQuote::new(0.1, 300, "omni")); // Gnosis
		fees.insert(81457, BridgeQuote::new(0.2, 300, "stargate")); // Blast
		Self::with_fees(fees)
	}

	pub fn with_fees(fees: HashMap<u64, BridgeQuote>) -> Self {
		Self {
			fees,
			failing_chains: HashSet::new(),
			response_delay_ms: 0,
			call_tracker: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Make quotes from the given source chains fail
	pub fn failing_on(mut self, chains: &[u64]) -> Self {
		self.failing_chains = chains.iter().copied().collect();
		self
	}

	/// Delay every quote response
	pub fn with_delay(mut self, delay_ms: u64) -> Self {
		self.response_delay_ms = delay_ms;
		self
	}

	/// Number of quote calls received so far
	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}

	pub fn reset_calls(&self) {
		self.call_tracker.store(0, Ordering::Relaxed);
	}
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
	fn name(&self) -> &str {
		"mock"
	}

	async fn get_quote(&self, request: &QuoteRequest) -> QuoteResult<BridgeQuote> {
		self.call_tracker.fetch_add(1, Ordering::Relaxed);

		if self.response_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
		}

		if self.failing_chains.contains(&request.from_chain_id) {
			return Err(QuoteError::Unavailable {
				from_chain: request.from_chain_id,
				to_chain: request.to_chain_id,
				reason: "simulated failure".to_string(),
			});
		}

		self.fees
			.get(&request.from_chain_id)
			.cloned()
			.ok_or(QuoteError::Unavailable {
				from_chain: request.from_chain_id,
				to_chain: request.to_chain_id,
				reason: "chain not in mock fee table".to_string(),
			})
	}

	async fn supported_chains(&self) -> QuoteResult<Vec<u64>> {
		let mut chains: Vec<u64> = self.fees.keys().copied().collect();
		chains.sort_unstable();
		Ok(chains)
	}
}

/// Mock balance provider with optional total failure
#[derive(Debug, Clone)]
pub struct MockBalanceProvider {
	registry: ChainRegistry,
	balances: HashMap<u64, f64>,
	should_fail: bool,
}

impl MockBalanceProvider {
	/// Balances matching the documented test scenarios
	pub fn new() -> Self {
		let mut balances = HashMap::new();
		balances.insert(137, 50.0); // Polygon
		balances.insert(42161, 100.0); // Arbitrum
		balances.insert(8453, 80.0); // Base
		balances.insert(100, 25.0); // Gnosis
		balances.insert(81457, 30.0); // Blast
		Self::with_balances(balances)
	}

	pub fn with_balances(balances: HashMap<u64, f64>) -> Self {
		Self {
			registry: ChainRegistry::mainnet_defaults(),
			balances,
			should_fail: false,
		}
	}

	/// Simulate total unavailability of the balance source
	pub fn failing() -> Self {
		Self {
			registry: ChainRegistry::mainnet_defaults(),
			balances: HashMap::new(),
			should_fail: true,
		}
	}
}

impl Default for MockBalanceProvider {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl BalanceProvider for MockBalanceProvider {
	async fn get_all_balances(&self, _user_address: &str) -> BalanceResult<BalanceSnapshot> {
		if self.should_fail {
			return Err(BalanceError::Unavailable {
				reason: "simulated balance source outage".to_string(),
			});
		}

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
