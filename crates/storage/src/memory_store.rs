//! In-memory result cache using DashMap with TTL support

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::traits::{RouteCache, StorageResult};
use bridgeopt_types::RouteOptimization;

/// One cached optimization with its expiry
#[derive(Debug, Clone)]
struct CachedEntry {
	result: RouteOptimization,
	expires_at: DateTime<Utc>,
}

/// In-memory TTL cache for optimizer results
#[derive(Clone, Default)]
pub struct MemoryStore {
	entries: Arc<DashMap<String, CachedEntry>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			entries: Arc::new(DashMap::new()),
		}
	}

	/// Start the periodic cleanup task for expired entries
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		let entries = Arc::clone(&self.entries);
		tokio::spawn(async move {
			let mut cleanup_interval = interval(Duration::from_secs(60));

			loop {
				cleanup_interval.tick().await;

				let now = Utc::now();
				let before = entries.len();
				entries.retain(|_key, entry| entry.expires_at > now);
				let removed = before - entries.len();
				if removed > 0 {
					debug!("Cleaned up {} expired cached routes", removed);
				}
			}
		})
	}

	/// Number of entries currently held, expired ones included
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[async_trait]
impl RouteCache for MemoryStore {
	async fn get(&self, key: &str) -> StorageResult<Option<RouteOptimization>> {
		let now = Utc::now();
		Ok(self.entries.get(key).and_then(|entry| {
			if entry.expires_at > now {
				Some(entry.result.clone())
			} else {
				None
			}
		}))
	}

	async fn set(
		&self,
		key: String,
		value: RouteOptimization,
		ttl_seconds: u64,
	) -> StorageResult<()> {
		let expires_at = Utc::now() + ChronoDuration::seconds(ttl_seconds as i64);
		self.entries.insert(
			key,
			CachedEntry {
				result: value,
				expires_at,
			},
		);
		Ok(())
	}

	async fn delete(&self, key: &str) -> StorageResult<bool> {
		Ok(self.entries.remove(key).is_some())
	}

	async fn purge_expired(&self) -> StorageResult<usize> {
		let now = Utc::now();
		let before = self.entries.len();
		self.entries.retain(|_key, entry| entry.expires_at > now);
		Ok(before - self.entries.len())
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}
}
