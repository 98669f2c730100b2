//! Blockchain network models and the supported-chain registry

use serde::{Deserialize, Serialize};

/// Supported blockchain network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Network {
	/// Chain ID (e.g., 137 for Polygon, 42161 for Arbitrum)
	pub chain_id: u64,
	/// Human-readable name (e.g., "Polygon", "Arbitrum")
	pub name: String,
	/// Default RPC endpoint for the network
	pub rpc_url: String,
	/// Address of the bridged token (USDC) on this network
	pub token_address: String,
}

impl Network {
	pub fn new(chain_id: u64, name: &str, rpc_url: &str, token_address: &str) -> Self {
		Self {
			chain_id,
			name: name.to_string(),
			rpc_url: rpc_url.to_string(),
			token_address: token_address.to_string(),
		}
	}
}

/// Registry of the networks this deployment supports
///
/// Lookup order is insertion order, which callers rely on for deterministic
/// iteration (balance snapshots, combination generation).
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
	networks: Vec<Network>,
}

impl ChainRegistry {
	pub fn new(networks: Vec<Network>) -> Self {
		Self { networks }
	}

	/// The five mainnet chains the original deployment supports
	pub fn mainnet_defaults() -> Self {
		Self::new(vec![
			Network::new(
				137,
				"Polygon",
				"https://polygon-rpc.com",
				"0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359",
			),
			Network::new(
				42161,
				"Arbitrum",
				"https://arb1.arbitrum.io/rpc",
				"0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
			),
			Network::new(
				8453,
				"Base",
				"https://mainnet.base.org",
				"0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
			),
			Network::new(
				100,
				"Gnosis",
				"https://rpc.xdaichain.com",
				"0xDDAfbb505ad214D7b80b1f830fcCc89B60fb7A83",
			),
			Network::new(
				81457,
				"Blast",
				"https://rpc.blast.io",
				"0x4300000000000000000000000000000000000003",
			),
		])
	}

	pub fn get(&self, chain_id: u64) -> Option<&Network> {
		self.networks.iter().find(|n| n.chain_id == chain_id)
	}

	pub fn is_supported(&self, chain_id: u64) -> bool {
		self.get(chain_id).is_some()
	}

	/// Chain name, falling back to the numeric id for unknown chains
	pub fn name(&self, chain_id: u64) -> String {
		self.get(chain_id)
			.map(|n| n.name.clone())
			.unwrap_or_else(|| chain_id.to_string())
	}

	pub fn token_address(&self, chain_id: u64) -> Option<&str> {
		self.get(chain_id).map(|n| n.token_address.as_str())
	}

	pub fn chain_ids(&self) -> Vec<u64> {
		self.networks.iter().map(|n| n.chain_id).collect()
	}

	pub fn networks(&self) -> &[Network] {
		&self.networks
	}

	pub fn len(&self) -> usize {
		self.networks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.networks.is_empty()
	}
}
