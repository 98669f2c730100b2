//! Cache trait for pluggable result-cache implementations

use async_trait::async_trait;

use super::StorageResult;
use crate::routes::RouteOptimization;

/// TTL cache for optimizer results
///
/// The optimizer itself is cache-agnostic; the request handler checks the
/// cache before optimizing and stores the result afterward.
#[async_trait]
pub trait RouteCache: Send + Sync {
	async fn get(&self, key: &str) -> StorageResult<Option<RouteOptimization>>;

	async fn set(
		&self,
		key: String,
		value: RouteOptimization,
		ttl_seconds: u64,
	) -> StorageResult<()>;

	async fn delete(&self, key: &str) -> StorageResult<bool>;

	/// Remove expired entries, returning how many were dropped
	async fn purge_expired(&self) -> StorageResult<usize>;

	async fn health_check(&self) -> StorageResult<bool>;
}

/// Cache key for one optimization request
pub fn route_cache_key(target_chain: &str, amount: &str, user_address: &str) -> String {
	format!("route:{}:{}:{}", target_chain, amount, user_address)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cache_key_format() {
		assert_eq!(
			route_cache_key("137", "100", "0xabc"),
			"route:137:100:0xabc"
		);
	}
}
