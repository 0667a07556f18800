//! Configuration management for the Avicola Admin dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with AVI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Example data loading
    pub seed: SeedConfig,

    /// Catalog shrinkage preview settings
    pub preview: PreviewConfig,

    /// Income screen settings
    pub finance: FinanceConfig,

    /// Logging output
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Load the example records at startup
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    /// Bird quantities the shrinkage preview is computed for
    pub sample_quantities: Vec<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FinanceConfig {
    /// Currency code shown next to amounts
    pub currency: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is not set
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AVI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("seed.enabled", true)?
            .set_default("preview.sample_quantities", vec![100i64, 500])?
            .set_default("finance.currency", "PEN")?
            .set_default("log.filter", "avicola_admin=debug,avicola_admin_app=debug")?
            .set_default("log.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AVI_ prefix)
            .add_source(
                Environment::with_prefix("AVI")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("preview.sample_quantities")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            seed: SeedConfig { enabled: true },
            preview: PreviewConfig::default(),
            finance: FinanceConfig {
                currency: "PEN".to_string(),
            },
            log: LogConfig {
                filter: "avicola_admin=debug,avicola_admin_app=debug".to_string(),
                json: false,
            },
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            sample_quantities: shared::PREVIEW_QUANTITIES.to_vec(),
        }
    }
}
