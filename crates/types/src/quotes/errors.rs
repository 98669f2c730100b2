//! Error types for quote operations

use thiserror::Error;

/// Errors from the quote provider, scoped to a single leg
///
/// A failed quote makes that leg's candidate unusable; it never aborts the
/// overall route search.
#[derive(Error, Debug)]
pub enum QuoteError {
	#[error("No quote available for {from_chain} -> {to_chain}: {reason}")]
	Unavailable {
		from_chain: u64,
		to_chain: u64,
		reason: String,
	},

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Quote request timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid quote response: {reason}")]
	InvalidResponse { reason: String },

	#[error("Quote provider API key is not configured")]
	MissingApiKey,

	#[error("Unsupported quote provider: {0}")]
	UnsupportedProvider(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
