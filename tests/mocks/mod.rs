//! Shared fixtures for integration tests

pub mod test_server;

pub use test_server::TestServer;

use bridge_optimizer::RouteRequest;

pub const TEST_TOKEN: &str = "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359";
pub const TEST_WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

/// Well-formed request targeting Polygon
pub fn polygon_route_request(amount: &str) -> RouteRequest {
	RouteRequest::new("137", amount, TEST_TOKEN, TEST_WALLET)
}
