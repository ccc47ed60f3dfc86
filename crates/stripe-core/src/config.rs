//! # Wire Configuration
//!
//! Settings for the codec layer, loaded from environment variables or a
//! TOML file. Secrets are optional here since nothing in this crate talks
//! to the network, but a key that is present must look like one.

use std::env;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::Codec;
use crate::error::{WireError, WireResult};
use crate::logger::{Level, LeveledLog, LeveledLogger};

/// API version the resource types are modelled on.
pub const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Codec configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// API version sent as `Stripe-Version` by the transport
    pub api_version: String,

    /// Threshold for the leveled logger
    pub log_level: Level,

    /// Secret API key (sk_test_..., sk_live_... or rk_...)
    pub secret_key: Option<String>,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            log_level: Level::default(),
            secret_key: None,
        }
    }
}

impl std::fmt::Debug for WireConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireConfig")
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    stripe: WireConfig,
}

impl WireConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `STRIPE_API_VERSION`
    /// - `STRIPE_LOG_LEVEL`
    /// - `STRIPE_SECRET_KEY`
    pub fn from_env() -> WireResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = Self::default();

        if let Ok(version) = env::var("STRIPE_API_VERSION") {
            config.api_version = version;
        }

        if let Ok(level) = env::var("STRIPE_LOG_LEVEL") {
            config.log_level = level.parse()?;
        }

        if let Ok(key) = env::var("STRIPE_SECRET_KEY") {
            config.secret_key = Some(key);
        }

        config.validate()?;
        debug!(api_version = %config.api_version, log_level = %config.log_level, "loaded config from env");
        Ok(config)
    }

    /// Parse a TOML document with a `[stripe]` table.
    pub fn from_toml_str(raw: &str) -> WireResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| WireError::Configuration(format!("invalid config file: {e}")))?;
        file.stripe.validate()?;
        debug!(api_version = %file.stripe.api_version, "loaded config from toml");
        Ok(file.stripe)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> WireResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Builder: set the log threshold
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    fn validate(&self) -> WireResult<()> {
        if self.api_version.trim().is_empty() {
            return Err(WireError::Configuration("api_version must not be empty".to_string()));
        }

        if let Some(key) = &self.secret_key {
            if !["sk_test_", "sk_live_", "rk_"].iter().any(|p| key.starts_with(p)) {
                return Err(WireError::Configuration(
                    "STRIPE_SECRET_KEY must start with sk_test_, sk_live_ or rk_".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.as_deref().is_some_and(|k| k.starts_with("sk_test_") || k.starts_with("rk_test_"))
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.as_deref().is_some_and(|k| k.starts_with("sk_live_") || k.starts_with("rk_live_"))
    }

    /// A leveled logger at the configured threshold
    pub fn logger(&self) -> Arc<dyn LeveledLog> {
        Arc::new(LeveledLogger::new(self.log_level))
    }

    /// A codec wired to [`Self::logger`]
    pub fn codec(&self) -> Codec {
        Codec::new(self.logger())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WireConfig::default();
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.log_level, Level::Error);
        assert!(!config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_from_toml_str() {
        let config = WireConfig::from_toml_str(
            r#"
            [stripe]
            api_version = "2024-06-20"
            log_level = "debug"
            secret_key = "sk_test_abc123"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            WireConfig {
                api_version: "2024-06-20".to_string(),
                log_level: Level::Debug,
                secret_key: Some("sk_test_abc123".to_string()),
            }
        );
        assert!(config.is_test_mode());
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = WireConfig::from_toml_str("").unwrap();
        assert_eq!(config, WireConfig::default());
    }

    #[test]
    fn test_rejects_malformed_key() {
        let result = WireConfig::from_toml_str("[stripe]\nsecret_key = \"pk_test_abc\"\n");
        assert!(matches!(result, Err(WireError::Configuration(_))));

        let result = WireConfig::from_toml_str("[stripe]\nlog_level = \"loud\"\n");
        assert!(matches!(result, Err(WireError::Configuration(_))));
    }

    #[test]
    fn test_restricted_live_key() {
        let config = WireConfig::from_toml_str("[stripe]\nsecret_key = \"rk_live_abc\"\n").unwrap();
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stripe]\nlog_level = \"warn\"").unwrap();
        let config = WireConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, Level::Warn);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_from_file_missing() {
        let result = WireConfig::from_file("/nonexistent/stripe-wire.toml");
        assert!(matches!(result, Err(WireError::Io(_))));
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let config = WireConfig::from_toml_str("[stripe]\nsecret_key = \"sk_live_topsecret\"\n").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains(DEFAULT_API_VERSION));
    }

    #[test]
    fn test_logger_uses_level() {
        let config = WireConfig::default().with_log_level(Level::Null);
        let codec = config.codec();
        let _ = codec.logger();
        assert_eq!(config.log_level, Level::Null);
    }
}
