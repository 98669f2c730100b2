//! Socket (Bungee) aggregator adapter
//!
//! Live quote and balance provider against the Socket v2 API. Quotes use
//! `GET /quote` with `singleTxOnly` and output-sorted routes; balances use
//! `GET /balances/token` per supported chain. Amounts cross the wire in
//! 6-decimal base units, matching the bridged USDC token.

use std::fmt;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client, StatusCode,
};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use bridgeopt_types::{
	BalanceError, BalanceProvider, BalanceResult, BalanceSnapshot, BridgeQuote, ChainRegistry,
	QuoteError, QuoteProvider, QuoteRequest, QuoteResult, TokenBalance,
};

/// Decimal places of the bridged token (USDC)
const TOKEN_DECIMALS: u32 = 6;

/// Socket v2 API client implementing both provider seams
#[derive(Clone)]
pub struct SocketAdapter {
	client: Client,
	base_url: Url,
	registry: ChainRegistry,
}

impl fmt::Debug for SocketAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SocketAdapter")
			.field("base_url", &self.base_url.as_str())
			.field("chains", &self.registry.len())
			.finish()
	}
}

/// `GET /quote` response
#[derive(Debug, Deserialize)]
struct SocketQuoteResponse {
	success: bool,
	#[serde(default)]
	result: Option<SocketQuoteResult>,
}

#[derive(Debug, Deserialize)]
struct SocketQuoteResult {
	#[serde(default)]
	routes: Vec<SocketRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocketRoute {
	/// Gas fees in 6-decimal base units
	total_gas_fees_in_usd: String,
	estimated_time_in_seconds: Option<u64>,
	#[serde(default)]
	user_txs: Vec<SocketUserTx>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocketUserTx {
	#[serde(default)]
	steps: Vec<SocketStep>,
}

#[derive(Debug, Deserialize)]
struct SocketStep {
	protocol: String,
}

/// `GET /balances/token` response
#[derive(Debug, Deserialize)]
struct SocketBalanceResponse {
	#[serde(default)]
	result: Option<SocketBalanceResult>,
}

#[derive(Debug, Deserialize)]
struct SocketBalanceResult {
	/// Balance in base units
	#[serde(default)]
	amount: Option<String>,
}

/// `GET /supported/chains` response
#[derive(Debug, Deserialize)]
struct SocketChainsResponse {
	#[serde(default)]
	result: Vec<SocketChain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocketChain {
	chain_id: u64,
}

impl SocketAdapter {
	pub fn new(
		endpoint: String,
		api_key: String,
		timeout_ms: u64,
		registry: ChainRegistry,
	) -> QuoteResult<Self> {
		if api_key.is_empty() {
			return Err(QuoteError::MissingApiKey);
		}

		let mut headers = HeaderMap::new();
		let key_value =
			HeaderValue::from_str(&api_key).map_err(|_| QuoteError::InvalidResponse {
				reason: "API key contains invalid header characters".to_string(),
			})?;
		headers.insert("API-KEY", key_value);
		headers.insert("Content-Type", HeaderValue::from_static("application/json"));
		headers.insert("Accept", HeaderValue::from_static("application/json"));

		let client = Client::builder()
			.default_headers(headers)
			.timeout(std::time::Duration::from_millis(timeout_ms))
			.build()
			.map_err(QuoteError::Http)?;

		let base_url = Url::parse(&endpoint).map_err(|e| QuoteError::InvalidResponse {
			reason: format!("Invalid endpoint '{}': {}", endpoint, e),
		})?;

		Ok(Self {
			client,
			base_url,
			registry,
		})
	}

	/// Join a path onto the base endpoint, treating the base as a directory
	fn url(&self, path: &str) -> QuoteResult<Url> {
		let mut base = self.base_url.clone();
		if !base.path().ends_with('/') {
			base.set_path(&format!("{}/", base.path()));
		}
		base.join(path).map_err(|e| QuoteError::InvalidResponse {
			reason: format!("Failed to join '{}' to endpoint: {}", path, e),
		})
	}

	async fn fetch_chain_balance(
		&self,
		network: &bridgeopt_types::Network,
		user_address: &str,
	) -> BalanceResult<f64> {
		let url = self
			.url("balances/token")
			.map_err(|e| BalanceError::Unavailable {
				reason: e.to_string(),
			})?;

		let response = self
			.client
			.get(url)
			.query(&[
				("chainId", network.chain_id.to_string()),
				("tokenAddress", network.token_address.clone()),
				("userAddress", user_address.to_string()),
			])
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(BalanceError::InvalidResponse {
				reason: format!("HTTP {} from balance endpoint", response.status()),
			});
		}

		let body: SocketBalanceResponse = response.json().await?;
		let raw = body
			.result
			.and_then(|r| r.amount)
			.unwrap_or_else(|| "0".to_string());
		let amount = from_base_units(&raw).ok_or(BalanceError::InvalidResponse {
			reason: format!("Unparseable balance amount '{}'", raw),
		})?;

		debug!("{} balance: {} USDC", network.name, amount);
		Ok(amount)
	}
}

#[async_trait]
impl QuoteProvider for SocketAdapter {
	fn name(&self) -> &str {
		"socket-v2"
	}

	async fn get_quote(&self, request: &QuoteRequest) -> QuoteResult<BridgeQuote> {
		debug!(
			"Fetching quote {} -> {} for {}",
			request.from_chain_id, request.to_chain_id, request.amount
		);

		// Same token on both sides unless the destination chain uses a
		// different deployment address
		let to_token = self
			.registry
			.token_address(request.to_chain_id)
			.unwrap_or(request.token_address.as_str())
			.to_string();

		let response = self
			.client
			.get(self.url("quote")?)
			.query(&[
				("fromChainId", request.from_chain_id.to_string()),
				("toChainId", request.to_chain_id.to_string()),
				("fromTokenAddress", request.token_address.clone()),
				("toTokenAddress", to_token),
				("fromAmount", to_base_units(request.amount)),
				("userAddress", request.user_address.clone()),
				("singleTxOnly", "true".to_string()),
				("sort", "output".to_string()),
			])
			.send()
			.await?;

		if response.status() == StatusCode::TOO_MANY_REQUESTS {
			return Err(QuoteError::Unavailable {
				from_chain: request.from_chain_id,
				to_chain: request.to_chain_id,
				reason: "rate limited".to_string(),
			});
		}
		if !response.status().is_success() {
			return Err(QuoteError::Unavailable {
				from_chain: request.from_chain_id,
				to_chain: request.to_chain_id,
				reason: format!("HTTP {}", response.status()),
			});
		}

		let body: SocketQuoteResponse = response.json().await?;
		let succeeded = body.success;
		let best = body
			.result
			.filter(|_| succeeded)
			.and_then(|r| r.routes.into_iter().next())
			.ok_or(QuoteError::Unavailable {
				from_chain: request.from_chain_id,
				to_chain: request.to_chain_id,
				reason: "no routes returned".to_string(),
			})?;

		let fee =
			from_base_units(&best.total_gas_fees_in_usd).ok_or(QuoteError::InvalidResponse {
				reason: format!(
					"Unparseable totalGasFeesInUsd '{}'",
					best.total_gas_fees_in_usd
				),
			})?;
		let estimated_time_seconds = best.estimated_time_in_seconds.unwrap_or(0);
		let protocol = best
			.user_txs
			.first()
			.and_then(|tx| tx.steps.first())
			.map(|step| step.protocol.clone())
			.unwrap_or_else(|| "unknown".to_string());

		Ok(BridgeQuote::new(fee, estimated_time_seconds, protocol))
	}

	async fn supported_chains(&self) -> QuoteResult<Vec<u64>> {
		let response = self.client.get(self.url("supported/chains")?).send().await?;

		if !response.status().is_success() {
			return Err(QuoteError::InvalidResponse {
				reason: format!("HTTP {} from chains endpoint", response.status()),
			});
		}

		let body: SocketChainsResponse = response.json().await?;
		Ok(body.result.into_iter().map(|c| c.chain_id).collect())
	}

	async fn health_check(&self) -> QuoteResult<bool> {
		Ok(self.supported_chains().await.map(|_| true).unwrap_or(false))
	}
}

#[async_trait]
impl BalanceProvider for SocketAdapter {
	/// Snapshot across every registered chain
	///
	/// A failed per-chain lookup becomes a zero balance; the call fails
	/// only when every chain's lookup failed.
	async fn get_all_balances(&self, user_address: &str) -> BalanceResult<BalanceSnapshot> {
		let lookups = self.registry.networks().iter().map(|network| async move {
			(
				network,
				self.fetch_chain_balance(network, user_address).await,
			)
		});

		let mut balances = Vec::with_capacity(self.registry.len());
		let mut failures = 0;
		for (network, outcome) in join_all(lookups).await {
			let amount = match outcome {
				Ok(amount) => amount,
				Err(error) => {
					warn!("Balance lookup failed for {}: {}", network.name, error);
					failures += 1;
					0.0
				},
			};
			balances.push(TokenBalance::new(network.chain_id, &network.name, amount));
		}

		if failures == self.registry.len() && failures > 0 {
			return Err(BalanceError::Unavailable {
				reason: "all per-chain balance lookups failed".to_string(),
			});
		}

		Ok(BalanceSnapshot::new(balances))
	}
}

/// Formatted amount to base-unit string (e.g. 50.0 -> "50000000")
fn to_base_units(amount: f64) -> String {
	let scaled = (amount * 10f64.powi(TOKEN_DECIMALS as i32)).round();
	format!("{}", scaled as u128)
}

/// Base-unit string to formatted amount (e.g. "50000000" -> 50.0)
fn from_base_units(raw: &str) -> Option<f64> {
	let units: f64 = raw.parse().ok()?;
	Some(units / 10f64.powi(TOKEN_DECIMALS as i32))
}
