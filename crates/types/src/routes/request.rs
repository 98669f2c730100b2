//! API request model for route optimization

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::{OptimizeRequest, ValidationResult};

/// Body of `POST /api/v1/routes`
///
/// Amount arrives as a string, matching the front end's fixed-point
/// formatting; it is parsed and range-checked here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
	/// Chain the funds must end up on, as a decimal chain id string
	pub target_chain: String,
	/// Required amount on the target chain, formatted units
	pub amount: String,
	pub token_address: String,
	pub user_address: String,
}

impl RouteRequest {
	pub fn new(
		target_chain: impl Into<String>,
		amount: impl Into<String>,
		token_address: impl Into<String>,
		user_address: impl Into<String>,
	) -> Self {
		Self {
			target_chain: target_chain.into(),
			amount: amount.into(),
			token_address: token_address.into(),
			user_address: user_address.into(),
		}
	}

	/// Validate formats and ranges, producing the optimizer input
	pub fn validate(&self) -> ValidationResult<OptimizeRequest> {
		let target_chain: u64 =
			self.target_chain
				.parse()
				.map_err(|_| ValidationError::InvalidChainId {
					value: self.target_chain.clone(),
				})?;

		let amount: f64 = self
			.amount
			.parse()
			.map_err(|_| ValidationError::InvalidAmount {
				value: self.amount.clone(),
				reason: "not a number".to_string(),
			})?;
		if !amount.is_finite() || amount <= 0.0 {
			return Err(ValidationError::InvalidAmount {
				value: self.amount.clone(),
				reason: "must be positive".to_string(),
			});
		}

		if !is_address(&self.token_address) {
			return Err(ValidationError::InvalidTokenAddress {
				value: self.token_address.clone(),
			});
		}
		if !is_address(&self.user_address) {
			return Err(ValidationError::InvalidUserAddress {
				value: self.user_address.clone(),
			});
		}

		Ok(OptimizeRequest::new(
			target_chain,
			amount,
			self.token_address.clone(),
			self.user_address.clone(),
		))
	}
}

/// `0x` followed by exactly 40 hex characters
fn is_address(value: &str) -> bool {
	value.len() == 42
		&& value.starts_with("0x")
		&& value[2..].chars().all(|c| c.is_ascii_hexdigit())
}
