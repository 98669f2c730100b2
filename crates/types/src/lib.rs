//! Bridge Optimizer Types
//!
//! Shared models and traits for the bridge route optimizer.
//! This crate contains all domain models organized by business entity.

pub mod balances;
pub mod models;
pub mod providers;
pub mod quotes;
pub mod routes;
pub mod storage;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use balances::{BalanceError, BalanceResult, BalanceSnapshot, TokenBalance};

pub use quotes::{BridgeQuote, QuoteError, QuoteRequest, QuoteResult};

pub use routes::{
	OptimizeError, OptimizeRequest, OptimizeResult, Route, RouteOptimization, RouteRequest,
	RouteResponse, RouteStep, ValidationError, ValidationResult, LOCAL_PROTOCOL,
};

pub use providers::{BalanceProvider, QuoteProvider};

pub use models::{ChainRegistry, Network};

pub use storage::{route_cache_key, RouteCache, StorageError, StorageResult};

/// Absolute tolerance used when reconciling decimal token amounts.
pub const AMOUNT_TOLERANCE: f64 = 1e-6;
