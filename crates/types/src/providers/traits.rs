//! Core provider traits for user implementations

use std::fmt::Debug;

use async_trait::async_trait;

use crate::balances::{BalanceResult, BalanceSnapshot};
use crate::quotes::{BridgeQuote, QuoteRequest, QuoteResult};

/// Source of bridging fee/time quotes for a single leg
///
/// Implementations may be a live external aggregator or a static fee table;
/// the optimizer is indifferent. Implementors must tolerate being called
/// concurrently for independent legs.
#[async_trait]
pub trait QuoteProvider: Send + Sync + Debug {
	/// Identifier for logging and the readiness probe
	fn name(&self) -> &str;

	/// Price one leg, or fail with a per-leg error
	async fn get_quote(&self, request: &QuoteRequest) -> QuoteResult<BridgeQuote>;

	/// Chain ids this provider can bridge between
	async fn supported_chains(&self) -> QuoteResult<Vec<u64>>;

	/// Whether the provider is currently reachable
	async fn health_check(&self) -> QuoteResult<bool> {
		Ok(true)
	}
}

/// Source of per-chain balance snapshots
#[async_trait]
pub trait BalanceProvider: Send + Sync + Debug {
	/// Complete snapshot across all supported chains, zero entries included
	///
	/// Fails only on total unavailability of the balance source.
	async fn get_all_balances(&self, user_address: &str) -> BalanceResult<BalanceSnapshot>;
}
