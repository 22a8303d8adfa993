//! SDK configuration loaded from TOML

use std::fmt;
use std::fs;
use std::path::Path;

use clmm_core::Percent;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

const MAINNET_PACKAGE: &str = "0x25929e7f29e0a30eb4e692952ba1b5b65a3a4d65ab5f2a32e1ba3edcb587f26d";
const TESTNET_PACKAGE: &str = "0x40aa5119ae0633e7ba3c80fe4fd3d9b5277300dead42f6f9e565e7dd589cf6cb";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Ledger network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// On-ledger type identifiers for one network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Package that defines the pool types
    pub package_id: String,

    /// Fully qualified pool object type
    pub pool_type: String,

    /// Fully qualified position object type
    pub position_type: String,

    /// Type of the signed 32-bit integer wrapper used as the tick table key
    pub i32_type: String,
}

impl NetworkConfig {
    fn for_package(package_id: &str) -> Self {
        Self {
            package_id: package_id.to_string(),
            pool_type: format!("{}::pool::Pool", package_id),
            position_type: format!("{}::position::Position", package_id),
            i32_type: format!("{}::i32::I32", package_id),
        }
    }

    pub fn mainnet() -> Self {
        Self::for_package(MAINNET_PACKAGE)
    }

    pub fn testnet() -> Self {
        Self::for_package(TESTNET_PACKAGE)
    }

    fn validate(&self, network: Network) -> SdkResult<()> {
        let fields = [
            ("package_id", &self.package_id),
            ("pool_type", &self.pool_type),
            ("position_type", &self.position_type),
            ("i32_type", &self.i32_type),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(SdkError::Config(format!("{}.{} must not be empty", network, name)));
            }
        }
        Ok(())
    }
}

/// SDK configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SdkConfig {
    /// Network to read from
    pub network: Network,

    /// Default slippage tolerance in basis points
    pub default_slippage_bps: u64,

    /// Project reward growth from the last ledger update to the wall clock
    pub reward_projection: bool,

    /// Default log level when RUST_LOG is not set
    pub log_level: String,

    /// Mainnet identifiers
    pub mainnet: NetworkConfig,

    /// Testnet identifiers
    pub testnet: NetworkConfig,
}

impl SdkConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> SdkResult<Self> {
        let config: SdkConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> SdkResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.default_slippage_bps > 10_000 {
            return Err(SdkError::Config(format!(
                "default_slippage_bps {} exceeds 10000 (100%)",
                self.default_slippage_bps
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(SdkError::Config(format!(
                "log_level {} is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        self.mainnet.validate(Network::Mainnet)?;
        self.testnet.validate(Network::Testnet)?;

        Ok(())
    }

    /// Identifiers of the selected network
    pub fn network_config(&self) -> &NetworkConfig {
        match self.network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }

    /// Default slippage tolerance
    pub fn default_slippage(&self) -> SdkResult<Percent> {
        Ok(Percent::from_bps(self.default_slippage_bps)?)
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            default_slippage_bps: 50, // 0.5%
            reward_projection: true,
            log_level: "info".to_string(),
            mainnet: NetworkConfig::mainnet(),
            testnet: NetworkConfig::testnet(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SdkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_slippage().unwrap(), Percent::from_bps(50).unwrap());
        assert!(config.network_config().i32_type.ends_with("::i32::I32"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SdkConfig {
            network: Network::Testnet,
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = SdkConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.network_config().package_id, TESTNET_PACKAGE);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = SdkConfig {
            default_slippage_bps: 10_001,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SdkError::Config(_))));

        let config = SdkConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SdkError::Config(_))));

        let mut config = SdkConfig::default();
        config.mainnet.i32_type.clear();
        assert!(matches!(config.validate(), Err(SdkError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            SdkConfig::from_toml_str("network = \"devnet\""),
            Err(SdkError::Config(_))
        ));
    }
}
