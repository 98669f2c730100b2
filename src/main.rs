//! Bridge Optimizer Server
//!
//! Main entry point for the route optimizer server

use bridge_optimizer::{init_tracing, load_config, OptimizerBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let settings = load_config()?;
	init_tracing(&settings);

	OptimizerBuilder::new()
		.with_settings(settings)
		.start_server()
		.await
}
