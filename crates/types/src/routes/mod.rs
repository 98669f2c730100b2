//! Core route domain models
//!
//! A route describes how the required amount is assembled on the target
//! chain: an optional local step for funds already there, plus one bridge
//! step per source chain. Steps execute in parallel, so a route's total
//! time is the maximum step time, not the sum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AMOUNT_TOLERANCE;

pub mod errors;
pub mod request;
pub mod response;

pub use errors::{OptimizeError, ValidationError};
pub use request::RouteRequest;
pub use response::RouteResponse;

/// Result type for optimizer operations
pub type OptimizeResult<T> = Result<T, OptimizeError>;

/// Result type for request validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Protocol marker for funds already present on the target chain
pub const LOCAL_PROTOCOL: &str = "local";

/// One hop of value toward the target chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
	pub from_chain: String,
	pub to_chain: String,
	/// Amount moved by this step, in formatted token units
	pub amount: f64,
	pub fee: f64,
	pub estimated_time_seconds: u64,
	pub protocol: String,
}

impl RouteStep {
	pub fn bridge(
		from_chain: impl Into<String>,
		to_chain: impl Into<String>,
		amount: f64,
		fee: f64,
		estimated_time_seconds: u64,
		protocol: impl Into<String>,
	) -> Self {
		Self {
			from_chain: from_chain.into(),
			to_chain: to_chain.into(),
			amount,
			fee,
			estimated_time_seconds,
			protocol: protocol.into(),
		}
	}

	/// No-op step for funds already on the target chain
	pub fn local(chain: impl Into<String>, amount: f64) -> Self {
		let chain = chain.into();
		Self {
			from_chain: chain.clone(),
			to_chain: chain,
			amount,
			fee: 0.0,
			estimated_time_seconds: 0,
			protocol: LOCAL_PROTOCOL.to_string(),
		}
	}

	pub fn is_local(&self) -> bool {
		self.protocol == LOCAL_PROTOCOL
	}
}

/// A fully-priced proposal for assembling the required amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
	pub steps: Vec<RouteStep>,
	pub total_fee: f64,
	pub total_time_seconds: u64,
	pub total_amount: f64,
	pub source_chains: Vec<String>,
	pub is_optimal: bool,
	pub explanation: String,
}

impl Route {
	/// Build a route from its steps, deriving the aggregate fields
	///
	/// Total time is the max over steps: bridges from different sources to
	/// the same target do not block each other.
	pub fn from_steps(steps: Vec<RouteStep>) -> Self {
		let total_fee = steps.iter().map(|s| s.fee).sum();
		let total_time_seconds = steps
			.iter()
			.map(|s| s.estimated_time_seconds)
			.max()
			.unwrap_or(0);
		let total_amount = steps.iter().map(|s| s.amount).sum();
		let source_chains = steps
			.iter()
			.filter(|s| !s.is_local())
			.map(|s| s.from_chain.clone())
			.collect();

		Self {
			steps,
			total_fee,
			total_time_seconds,
			total_amount,
			source_chains,
			is_optimal: false,
			explanation: String::new(),
		}
	}

	/// Check the sum-of-steps invariant against an expected total
	pub fn reconciles_to(&self, expected_amount: f64) -> bool {
		(self.total_amount - expected_amount).abs() <= AMOUNT_TOLERANCE
	}

	/// Number of distinct source chains the route draws from
	pub fn source_chain_count(&self) -> usize {
		self.source_chains.len()
	}
}

/// Ranked optimizer output for one request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptimization {
	pub success: bool,
	/// Best route first, at most MAX_ROUTES entries
	pub routes: Vec<Route>,
	pub target_chain: String,
	pub requested_amount: f64,
	pub timestamp: DateTime<Utc>,
}

impl RouteOptimization {
	pub fn succeeded(target_chain: impl Into<String>, requested_amount: f64, routes: Vec<Route>) -> Self {
		Self {
			success: true,
			routes,
			target_chain: target_chain.into(),
			requested_amount,
			timestamp: Utc::now(),
		}
	}

	/// Sufficient balance existed but no candidate survived quoting
	pub fn no_route(target_chain: impl Into<String>, requested_amount: f64) -> Self {
		Self {
			success: false,
			routes: Vec::new(),
			target_chain: target_chain.into(),
			requested_amount,
			timestamp: Utc::now(),
		}
	}

	pub fn best_route(&self) -> Option<&Route> {
		self.routes.first()
	}
}

/// Validated optimizer input, one per optimization call
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeRequest {
	pub target_chain: u64,
	/// Required amount on the target chain, formatted units
	pub required_amount: f64,
	pub token_address: String,
	pub user_address: String,
}

impl OptimizeRequest {
	pub fn new(
		target_chain: u64,
		required_amount: f64,
		token_address: impl Into<String>,
		user_address: impl Into<String>,
	) -> Self {
		Self {
			target_chain,
			required_amount,
			token_address: token_address.into(),
			user_address: user_address.into(),
		}
	}
}
