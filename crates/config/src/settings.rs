//! Configuration settings structures

use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

use bridgeopt_types::{BridgeQuote, ChainRegistry, Network};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub chains: Vec<ChainSettings>,
	pub provider: ProviderSettings,
	pub optimizer: OptimizerSettings,
	pub cache: CacheSettings,
	pub logging: LoggingSettings,
}

impl Settings {
	/// Registry of supported chains; falls back to the mainnet defaults
	/// when the chain list is empty
	pub fn chain_registry(&self) -> ChainRegistry {
		if self.chains.is_empty() {
			return ChainRegistry::mainnet_defaults();
		}
		ChainRegistry::new(
			self.chains
				.iter()
				.map(|c| Network::new(c.chain_id, &c.name, &c.rpc_url, &c.token_address))
				.collect(),
		)
	}
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

/// One supported chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainSettings {
	pub chain_id: u64,
	pub name: String,
	pub rpc_url: String,
	pub token_address: String,
}

/// Quote provider selection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
	/// Configured fee table, no external calls
	Static,
	/// Live Socket v2 aggregator
	SocketV2,
}

impl ProviderKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProviderKind::Static => "static",
			ProviderKind::SocketV2 => "socket-v2",
		}
	}
}

/// Quote/balance provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderSettings {
	pub kind: ProviderKind,
	pub endpoint: String,
	/// Name of the environment variable holding the aggregator API key
	pub api_key_env: String,
	pub request_timeout_ms: u64,
	pub static_fees: Vec<StaticFeeSettings>,
	pub static_balances: Vec<StaticBalanceSettings>,
}

impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			kind: ProviderKind::Static,
			endpoint: "https://api.socket.tech/v2".to_string(),
			api_key_env: "BUNGEE_API_KEY".to_string(),
			request_timeout_ms: 5_000,
			static_fees: Vec::new(),
			static_balances: Vec::new(),
		}
	}
}

impl ProviderSettings {
	/// Resolve the API key from the configured environment variable
	pub fn api_key(&self) -> Option<String> {
		env::var(&self.api_key_env).ok().filter(|k| !k.is_empty())
	}

	/// Fee table keyed by source chain id, for the static provider
	pub fn fee_table(&self) -> HashMap<u64, BridgeQuote> {
		self.static_fees
			.iter()
			.map(|f| {
				(
					f.chain_id,
					BridgeQuote::new(f.fee, f.estimated_time_seconds, f.protocol.clone()),
				)
			})
			.collect()
	}

	/// Balances keyed by chain id, for the static balance provider
	pub fn balance_table(&self) -> HashMap<u64, f64> {
		self.static_balances
			.iter()
			.map(|b| (b.chain_id, b.amount))
			.collect()
	}
}

/// One static fee table entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StaticFeeSettings {
	pub chain_id: u64,
	pub fee: f64,
	pub estimated_time_seconds: u64,
	pub protocol: String,
}

/// One static balance entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StaticBalanceSettings {
	pub chain_id: u64,
	pub amount: f64,
}

/// Route search tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OptimizerSettings {
	pub max_splits: usize,
	pub max_routes: usize,
	pub fee_weight: f64,
	pub time_weight: f64,
	/// Per-leg quote timeout in milliseconds
	pub per_quote_timeout_ms: u64,
	/// Deadline for a whole optimization call in milliseconds
	pub global_timeout_ms: u64,
	pub max_concurrent_quotes: usize,
}

impl Default for OptimizerSettings {
	fn default() -> Self {
		Self {
			max_splits: 3,
			max_routes: 3,
			fee_weight: 0.7,
			time_weight: 0.3,
			per_quote_timeout_ms: 3_000,
			global_timeout_ms: 10_000,
			max_concurrent_quotes: 8,
		}
	}
}

/// Result cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
	pub enabled: bool,
	pub ttl_seconds: u64,
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			ttl_seconds: 30,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_mirror_original_deployment() {
		let settings = Settings::default();

		assert_eq!(settings.server.port, 3000);
		assert_eq!(settings.cache.ttl_seconds, 30);
		assert_eq!(settings.optimizer.max_splits, 3);
		assert_eq!(settings.optimizer.max_routes, 3);
		assert_eq!(settings.optimizer.fee_weight, 0.7);
		assert_eq!(settings.provider.kind, ProviderKind::Static);
		assert_eq!(settings.chain_registry().len(), 5);
	}

	#[test]
	fn test_explicit_chains_override_defaults() {
		let settings = Settings {
			chains: vec![ChainSettings {
				chain_id: 10,
				name: "Optimism".to_string(),
				rpc_url: "https://mainnet.optimism.io".to_string(),
				token_address: "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85".to_string(),
			}],
			..Settings::default()
		};

		let registry = settings.chain_registry();
		assert_eq!(registry.len(), 1);
		assert!(registry.is_supported(10));
		assert!(!registry.is_supported(137));
	}

	#[test]
	fn test_fee_table_conversion() {
		let settings = ProviderSettings {
			static_fees: vec![StaticFeeSettings {
				chain_id: 8453,
				fee: 0.5,
				estimated_time_seconds: 300,
				protocol: "across".to_string(),
			}],
			..ProviderSettings::default()
		};

		let table = settings.fee_table();
		assert_eq!(table.len(), 1);
		assert_eq!(table[&8453].fee, 0.5);
	}

	#[test]
	fn test_provider_kind_kebab_case() {
		assert_eq!(
			serde_json::from_str::<ProviderKind>("\"socket-v2\"").unwrap(),
			ProviderKind::SocketV2
		);
		assert_eq!(ProviderKind::SocketV2.as_str(), "socket-v2");
	}
}
