//! Configuration for Catalog API

use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use domain_products::models::DEFAULT_MAX_RECORDS;

pub use core_config::Environment;

/// Record store settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Store capacity (CATALOG_MAX_RECORDS)
    pub max_records: usize,
    /// Load the demo catalog at startup (CATALOG_SEED)
    pub seed: bool,
}

impl FromEnv for CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_records: env_parse_or("CATALOG_MAX_RECORDS", DEFAULT_MAX_RECORDS)?,
            seed: env_parse_or("CATALOG_SEED", true)?,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            catalog,
            environment,
        })
    }
}
