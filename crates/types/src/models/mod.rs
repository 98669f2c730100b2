//! Shared domain models

pub mod network;

pub use network::{ChainRegistry, Network};
