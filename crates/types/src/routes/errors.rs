//! Error types for route validation and optimization

use thiserror::Error;

use crate::balances::BalanceError;

/// Validation errors for incoming route requests
///
/// Caught before the optimizer is invoked; surfaced as HTTP 4xx.
#[derive(Error, Debug)]
pub enum ValidationError {
	#[error("Invalid chain ID format: {value}")]
	InvalidChainId { value: String },

	#[error("Invalid amount: {value} - {reason}")]
	InvalidAmount { value: String, reason: String },

	#[error("Invalid token address format: {value}")]
	InvalidTokenAddress { value: String },

	#[error("Invalid user address format: {value}")]
	InvalidUserAddress { value: String },

	#[error("Unsupported target chain: {chain_id}")]
	UnsupportedChain { chain_id: u64 },
}

/// Errors that make an optimization call unanswerable
///
/// Per-leg quote failures are not represented here: they drop the affected
/// candidate and the search continues. "Sufficient balance but nothing
/// quotable" is reported as a `success = false` result, not an error.
#[derive(Error, Debug)]
pub enum OptimizeError {
	#[error(
		"Insufficient balance: required {required}, available {available} (short {shortfall})"
	)]
	InsufficientBalance {
		required: f64,
		available: f64,
		shortfall: f64,
	},

	#[error("Balance source failed: {0}")]
	Balance(#[from] BalanceError),

	#[error("Optimization deadline exceeded after {timeout_ms}ms")]
	DeadlineExceeded { timeout_ms: u64 },
}
