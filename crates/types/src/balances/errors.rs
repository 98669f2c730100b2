//! Error types for balance operations

use thiserror::Error;

/// Errors from the balance source
///
/// Total unavailability of the balance source is fatal for the request;
/// per-chain lookup failures are handled inside the provider by reporting a
/// zero balance for that chain.
#[derive(Error, Debug)]
pub enum BalanceError {
	#[error("Balance source unavailable: {reason}")]
	Unavailable { reason: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Invalid balance response: {reason}")]
	InvalidResponse { reason: String },
}
