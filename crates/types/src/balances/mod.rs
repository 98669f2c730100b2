//! Per-chain token balance models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::BalanceError;

/// Result type for balance operations
pub type BalanceResult<T> = Result<T, BalanceError>;

/// A user's token balance on one chain, in formatted (decimal) units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
	pub chain_id: u64,
	pub chain_name: String,
	pub amount: f64,
}

impl TokenBalance {
	pub fn new(chain_id: u64, chain_name: impl Into<String>, amount: f64) -> Self {
		Self {
			chain_id,
			chain_name: chain_name.into(),
			amount,
		}
	}
}

/// Immutable snapshot of a user's balances across all supported chains
///
/// Always complete: chains with no funds carry a zero entry. The optimizer
/// reads the snapshot but never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
	pub balances: Vec<TokenBalance>,
	pub timestamp: DateTime<Utc>,
}

impl BalanceSnapshot {
	pub fn new(balances: Vec<TokenBalance>) -> Self {
		Self {
			balances,
			timestamp: Utc::now(),
		}
	}

	/// Sum of balances across every chain, target included
	pub fn total(&self) -> f64 {
		self.balances.iter().map(|b| b.amount).sum()
	}

	/// Balance on one chain, zero if the chain is absent from the snapshot
	pub fn on_chain(&self, chain_id: u64) -> f64 {
		self.balances
			.iter()
			.find(|b| b.chain_id == chain_id)
			.map(|b| b.amount)
			.unwrap_or(0.0)
	}

	/// Name of a chain as recorded in the snapshot, if present
	pub fn chain_name(&self, chain_id: u64) -> Option<&str> {
		self.balances
			.iter()
			.find(|b| b.chain_id == chain_id)
			.map(|b| b.chain_name.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn snapshot() -> BalanceSnapshot {
		BalanceSnapshot::new(vec![
			TokenBalance::new(137, "Polygon", 50.0),
			TokenBalance::new(42161, "Arbitrum", 100.0),
			TokenBalance::new(8453, "Base", 0.0),
		])
	}

	#[test]
	fn test_total_sums_all_chains() {
		assert_eq!(snapshot().total(), 150.0);
	}

	#[test]
	fn test_on_chain_lookup() {
		let snap = snapshot();

		assert_eq!(snap.on_chain(137), 50.0);
		assert_eq!(snap.on_chain(8453), 0.0);
		assert_eq!(snap.on_chain(999), 0.0);
	}

	#[test]
	fn test_chain_name_lookup() {
		let snap = snapshot();

		assert_eq!(snap.chain_name(42161), Some("Arbitrum"));
		assert_eq!(snap.chain_name(999), None);
	}
}
