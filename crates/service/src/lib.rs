//! Bridge Optimizer Service
//!
//! Core logic for route search, amount allocation and cost ranking.

pub mod combinations;
pub mod optimizer;
pub mod scoring;

pub use combinations::{combinations, Combinations};
pub use optimizer::{OptimizerConfig, RouteOptimizerService};
pub use scoring::{score, CostWeights};
