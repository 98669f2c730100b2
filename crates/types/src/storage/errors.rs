//! Error types for cache operations

use thiserror::Error;

/// Cache backend errors
#[derive(Error, Debug)]
pub enum StorageError {
	#[error("Storage backend error: {0}")]
	Backend(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
