//! Bridge Optimizer API
//!
//! Axum HTTP surface: route optimization endpoint plus liveness and
//! readiness probes.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;
