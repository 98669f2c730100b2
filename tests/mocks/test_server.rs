//! Test server for integration tests
//!
//! Spawns the full application on an ephemeral port with mock providers.

use std::sync::Arc;

use tokio::task::JoinHandle;

use bridge_optimizer::mocks::{MockBalanceProvider, MockQuoteProvider};
use bridge_optimizer::{BalanceProvider, OptimizerBuilder, QuoteProvider, Settings};

/// Test server instance with configurable providers
pub struct TestServer {
	pub base_url: String,
	handle: JoinHandle<()>,
}

impl TestServer {
	/// Spawn a test server with the default mock providers
	#[allow(dead_code)]
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_providers(
			Arc::new(MockQuoteProvider::new()),
			Arc::new(MockBalanceProvider::new()),
		)
		.await
	}

	/// Spawn a test server with specific providers
	pub async fn spawn_with_providers(
		quote_provider: Arc<dyn QuoteProvider>,
		balance_provider: Arc<dyn BalanceProvider>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (router, _state) = OptimizerBuilder::new()
			.with_settings(Settings::default())
			.with_quote_provider(quote_provider)
			.with_balance_provider(balance_provider)
			.start()
			.await?;

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, router).await;
		});

		Ok(Self {
			base_url: format!("http://{}", addr),
			handle,
		})
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}
