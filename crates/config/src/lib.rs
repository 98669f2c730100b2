//! Bridge Optimizer Config
//!
//! Settings structures, file/env loading and startup logging.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use config::ConfigError;
pub use loader::load_config;
pub use settings::{
	CacheSettings, ChainSettings, LogFormat, LoggingSettings, OptimizerSettings, ProviderKind,
	ProviderSettings, ServerSettings, Settings, StaticBalanceSettings, StaticFeeSettings,
};
pub use startup_logger::log_startup;
