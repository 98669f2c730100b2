//! HTTP request handlers

pub mod common;
pub mod health;
pub mod routes;

pub use health::{health, ready};
pub use routes::post_routes;
