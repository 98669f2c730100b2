//! API response envelope for route optimization

use serde::{Deserialize, Serialize};

use super::RouteOptimization;

/// Envelope returned by `POST /api/v1/routes`
///
/// Always a structured body: a ranked route list on success, a reason
/// string on failure. Never a raw fault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
	pub status: ResponseStatus,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<RouteOptimization>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
	Success,
	Error,
}

impl RouteResponse {
	pub fn success(data: RouteOptimization) -> Self {
		Self {
			status: ResponseStatus::Success,
			data: Some(data),
			error: None,
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			status: ResponseStatus::Error,
			data: None,
			error: Some(message.into()),
		}
	}
}
