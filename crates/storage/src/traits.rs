//! Cache traits for pluggable storage implementations

// Re-export the cache traits from the types crate
pub use bridgeopt_types::storage::{route_cache_key, RouteCache, StorageError, StorageResult};
