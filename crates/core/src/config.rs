//! Configuration management
//!
//! This module loads the optional s3sync configuration file and builds the
//! explicit client configuration handed to the bucket client. The file is
//! stored in TOML format at ~/.config/s3sync/config.toml and is never written
//! by the tool itself.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3SYNC_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default client settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Client settings used when the command line does not provide them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Named credential profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

/// Settings the bucket client is constructed from
///
/// Credential profile selection lives here rather than in the process
/// environment, so building a client has no hidden inputs beyond the SDK's
/// own credential chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Named credential profile
    pub profile: Option<String>,

    /// Region override
    pub region: Option<String>,

    /// Custom endpoint URL
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    pub force_path_style: bool,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credential profile; blank names are ignored
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        let profile = profile.into();
        if !profile.trim().is_empty() {
            self.profile = Some(profile);
        }
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }

    /// Fill unset fields from the configuration file defaults
    pub fn or_defaults(self, defaults: &Defaults) -> Self {
        Self {
            profile: self.profile.or_else(|| defaults.profile.clone()),
            region: self.region.or_else(|| defaults.region.clone()),
            endpoint_url: self.endpoint_url.or_else(|| defaults.endpoint_url.clone()),
            force_path_style: self.force_path_style || defaults.force_path_style,
        }
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// `S3SYNC_CONFIG_DIR` takes precedence over the platform config directory.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3sync"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3sync.",
                config.schema_version, SCHEMA_VERSION
            )));
        }
        config.schema_version = SCHEMA_VERSION;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert!(config.defaults.profile.is_none());
        assert!(!config.defaults.force_path_style);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert!(config.defaults.region.is_none());
    }

    #[test]
    fn test_load_defaults() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
            schema_version = 1

            [defaults]
            profile = "work"
            region = "eu-west-1"
            endpoint_url = "http://localhost:9000"
            force_path_style = true
            "#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.defaults.profile.as_deref(), Some("work"));
        assert_eq!(config.defaults.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            config.defaults.endpoint_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(config.defaults.force_path_style);
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_malformed_file() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = \"one\"").unwrap();
        assert!(matches!(manager.load(), Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let defaults = Defaults {
            profile: Some("file-profile".into()),
            region: Some("us-west-2".into()),
            endpoint_url: None,
            force_path_style: true,
        };

        let config = ClientConfig::new()
            .with_profile("cli-profile")
            .or_defaults(&defaults);

        assert_eq!(config.profile.as_deref(), Some("cli-profile"));
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert!(config.endpoint_url.is_none());
        assert!(config.force_path_style);
    }

    #[test]
    fn test_blank_profile_ignored() {
        let config = ClientConfig::new().with_profile("   ");
        assert!(config.profile.is_none());
    }
}
