//! Cost scoring for route ranking
//!
//! The score blends total fee with total time; lower is better. Routes
//! being compared always target the same bridged amount, so fee and time
//! are directly comparable absolute quantities and no normalization is
//! applied.

use bridgeopt_types::Route;

/// Weights for the fee/time blend
///
/// Fee dominates; time acts as a tie-breaker measured in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
	pub fee_weight: f64,
	pub time_weight: f64,
}

impl Default for CostWeights {
	fn default() -> Self {
		Self {
			fee_weight: 0.7,
			time_weight: 0.3,
		}
	}
}

/// Score a route for ordering; strictly used for ranking
pub fn score(route: &Route, weights: &CostWeights) -> f64 {
	let fee_score = route.total_fee;
	let time_score = route.total_time_seconds as f64 / 60.0;

	fee_score * weights.fee_weight + time_score * weights.time_weight
}
