//! Routes API E2E tests
//!
//! Tests for the /api/v1/routes endpoint covering request validation,
//! response envelopes, caching and failure mapping.

mod mocks;

use std::sync::Arc;

use reqwest::Client;

use crate::mocks::{polygon_route_request, TestServer};
use bridge_optimizer::mocks::{MockBalanceProvider, MockQuoteProvider};

#[tokio::test]
async fn test_routes_valid_request() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&polygon_route_request("100"))
		.send()
		.await
		.unwrap();

	assert!(resp.status().is_success());

	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "success");
	assert_eq!(body["data"]["success"], true);
	assert!(body["data"]["routes"].is_array());
	assert_eq!(body["data"]["targetChain"], "Polygon");

	// Best route first: local 50 plus split from the cheap chains
	let best = &body["data"]["routes"][0];
	assert_eq!(best["isOptimal"], true);
	assert_eq!(best["steps"][0]["protocol"], "local");
	assert!(best["explanation"].as_str().unwrap().contains("total fee"));

	server.abort();
}

#[tokio::test]
async fn test_routes_no_bridging_needed() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&polygon_route_request("40"))
		.send()
		.await
		.unwrap();

	let body: serde_json::Value = resp.json().await.unwrap();
	let routes = body["data"]["routes"].as_array().unwrap();

	assert_eq!(routes.len(), 1);
	assert_eq!(routes[0]["totalFee"], 0.0);
	assert_eq!(routes[0]["totalTimeSeconds"], 0);
	assert_eq!(routes[0]["steps"][0]["protocol"], "local");

	server.abort();
}

#[tokio::test]
async fn test_routes_insufficient_balance_is_structured_error() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	// Mock balances total 285
	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&polygon_route_request("300"))
		.send()
		.await
		.unwrap();

	// Business failure, not a transport failure
	assert!(resp.status().is_success());

	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "error");
	assert!(body["error"]
		.as_str()
		.unwrap()
		.contains("Insufficient balance"));
	assert!(body.get("data").is_none());

	server.abort();
}

#[tokio::test]
async fn test_routes_validation_failures_are_422() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let mut bad_amount = polygon_route_request("100");
	bad_amount.amount = "-5".to_string();

	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&bad_amount)
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "VALIDATION_ERROR");

	let mut bad_address = polygon_route_request("100");
	bad_address.user_address = "not-an-address".to_string();

	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&bad_address)
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

	server.abort();
}

#[tokio::test]
async fn test_routes_unsupported_chain_is_400() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let mut request = polygon_route_request("100");
	request.target_chain = "1".to_string(); // Ethereum is not registered

	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&request)
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "UNSUPPORTED_CHAIN");

	server.abort();
}

#[tokio::test]
async fn test_routes_second_identical_request_hits_cache() {
	let quotes = MockQuoteProvider::new();
	let server = TestServer::spawn_with_providers(
		Arc::new(quotes.clone()),
		Arc::new(MockBalanceProvider::new()),
	)
	.await
	.expect("Failed to start test server");
	let client = Client::new();

	let request = polygon_route_request("100");
	let first: serde_json::Value = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&request)
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	let calls_after_first = quotes.call_count();
	assert!(calls_after_first > 0);

	let second: serde_json::Value = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&request)
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();

	// Served from cache: identical payload, no further quote calls
	assert_eq!(quotes.call_count(), calls_after_first);
	assert_eq!(first["data"]["routes"], second["data"]["routes"]);

	server.abort();
}

#[tokio::test]
async fn test_routes_balance_outage_is_503() {
	let server = TestServer::spawn_with_providers(
		Arc::new(MockQuoteProvider::new()),
		Arc::new(MockBalanceProvider::failing()),
	)
	.await
	.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(format!("{}/api/v1/routes", server.base_url))
		.json(&polygon_route_request("100"))
		.send()
		.await
		.unwrap();

	assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "BALANCE_UNAVAILABLE");

	server.abort();
}

#[tokio::test]
async fn test_health_and_ready_probes() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(format!("{}/health", server.base_url))
		.send()
		.await
		.unwrap();
	assert!(resp.status().is_success());
	assert_eq!(resp.text().await.unwrap(), "OK");

	let resp = client
		.get(format!("{}/ready", server.base_url))
		.send()
		.await
		.unwrap();
	assert!(resp.status().is_success());
	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "ready");
	assert_eq!(body["cache_healthy"], true);

	server.abort();
}
