//! Configuration loading utilities

use config::{Config, ConfigError, Environment, File};

use crate::Settings;

/// Load configuration from the optional config file and environment
///
/// File keys come from `config/config.{toml,yaml,json}`; environment
/// overrides use the `BRIDGEOPT` prefix with `__` as the section separator
/// (e.g. `BRIDGEOPT_SERVER__PORT=8080`). Missing sections fall back to
/// defaults mirroring the original deployment.
pub fn load_config() -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name("config/config").required(false))
		.add_source(
			Environment::with_prefix("BRIDGEOPT")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	s.try_deserialize()
}
