//! Bridge quote models
//!
//! A quote prices one leg: moving `amount` of the token from one chain to
//! the target chain through whatever protocol the provider selects.

use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::QuoteError;

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Request for a fee/time quote on a single bridge leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	pub from_chain_id: u64,
	pub to_chain_id: u64,
	/// Amount to move, in formatted (decimal) units
	pub amount: f64,
	pub token_address: String,
	pub user_address: String,
}

impl QuoteRequest {
	pub fn new(
		from_chain_id: u64,
		to_chain_id: u64,
		amount: f64,
		token_address: impl Into<String>,
		user_address: impl Into<String>,
	) -> Self {
		Self {
			from_chain_id,
			to_chain_id,
			amount,
			token_address: token_address.into(),
			user_address: user_address.into(),
		}
	}
}

/// A provider's answer for one leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeQuote {
	/// Bridging fee in formatted token units
	pub fee: f64,
	pub estimated_time_seconds: u64,
	/// Bridge protocol the provider selected (e.g. "across", "stargate")
	pub protocol: String,
}

impl BridgeQuote {
	pub fn new(fee: f64, estimated_time_seconds: u64, protocol: impl Into<String>) -> Self {
		Self {
			fee,
			estimated_time_seconds,
			protocol: protocol.into(),
		}
	}
}
