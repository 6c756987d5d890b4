//! Configuration file loading and management
//!
//! This module handles loading and parsing the daemon configuration from
//! `$XDG_CONFIG_HOME/pepperhost/config.toml`. If the configuration file doesn't
//! exist, a default configuration is created with documented comments.
//!
//! The `[switches]` table stands in for the process launch switches read
//! during plugin registration, and `[build]` holds the feature gates.

use anyhow::{Context, Result};
use pepper_plugin_registry::BuildFeatures;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Daemon-specific configuration
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// Launch switches, keyed by switch name without leading dashes
    #[serde(default)]
    pub switches: BTreeMap<String, String>,
    /// Build feature gates
    #[serde(default)]
    pub build: BuildFeatures,
}

/// Daemon server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DaemonConfig {
    /// Bind address for the JSON-RPC server
    /// Default: "127.0.0.1:3131"
    pub bind_address: String,
    /// Log level (trace, debug, info, warn, error)
    /// Default: "info"
    pub log_level: String,
    /// Identifier of the peer process whose queries this daemon serves
    /// Default: 0
    pub render_process_id: i32,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3131".to_string(),
            log_level: "info".to_string(),
            render_process_id: 0,
        }
    }
}

impl Config {
    /// Load configuration from the specified path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default XDG config location
    ///
    /// If the configuration file doesn't exist, creates a default configuration
    /// file with documented comments.
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_file(&config_path)?;
        }

        Self::load(&config_path)
    }

    /// Get the default configuration file path
    ///
    /// Returns `$XDG_CONFIG_HOME/pepperhost/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "pepperhost", "pepperhost")
            .context("Failed to determine project directories")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Create a default configuration file with documented comments
    fn create_default_file(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

        tracing::info!("Created default configuration file at: {}", path.display());
        Ok(())
    }

    /// Generate the default configuration file content with comments
    fn default_config_content() -> String {
        r#"# pepperhost Daemon Configuration

[daemon]
# Bind address for the JSON-RPC query endpoint
# Default: "127.0.0.1:3131"
bind_address = "127.0.0.1:3131"

# Log level: trace, debug, info, warn, error
# Default: "info"
log_level = "info"

# Peer process served by this daemon
render_process_id = 0

# Launch switches read during plugin registration.
# A plugin whose path switch is empty is not registered.
[switches]
# ppapi-flash-path = "/opt/google/chrome/PepperFlash/libpepflashplayer.so"
# ppapi-flash-version = "19.0.0.185"
# widevine-cdm-path = "/opt/google/chrome/libwidevinecdmadapter.so"
# widevine-cdm-version = "1.4.8.824"
# register-standard-schemes = "app,atom"

# Build feature gates. The decryption module is only registered when it is
# supported, plugin host processes are enabled, and it is not delivered as a
# self-updating component.
[build]
decryption_module_supported = true
plugin_host_process_enabled = true
self_updating_component = false
proprietary_codecs = false
"#
        .to_string()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.daemon
            .bind_address
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("Invalid bind_address: {}", self.daemon.bind_address))?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.daemon.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log_level: {}. Must be one of: {}",
                self.daemon.log_level,
                valid_log_levels.join(", ")
            );
        }

        if self.switches.keys().any(|name| name.trim().is_empty()) {
            anyhow::bail!("Switch names cannot be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pepper_plugin_registry::switches::{PPAPI_FLASH_PATH, WIDEVINE_CDM_VERSION};
    use pepper_plugin_registry::SwitchSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.daemon.bind_address, "127.0.0.1:3131");
        assert_eq!(config.daemon.log_level, "info");
        assert!(config.switches.is_empty());
        assert_eq!(config.build, BuildFeatures::default());
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[daemon]
bind_address = "127.0.0.1:4000"
log_level = "debug"
render_process_id = 12

[switches]
ppapi-flash-path = "/opt/flash.so"
widevine-cdm-version = "1.4.8.824"

[build]
proprietary_codecs = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.daemon.bind_address, "127.0.0.1:4000");
        assert_eq!(config.daemon.render_process_id, 12);
        assert_eq!(config.switches.switch_value(PPAPI_FLASH_PATH), "/opt/flash.so");
        assert_eq!(config.switches.switch_value(WIDEVINE_CDM_VERSION), "1.4.8.824");
        assert!(config.build.proprietary_codecs);
        assert!(config.build.decryption_module_supported);
    }

    #[test]
    fn test_load_minimal_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(&Config::default_config_content()).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.switches.is_empty());
        assert_eq!(config.daemon, DaemonConfig::default());
    }

    #[test]
    fn test_validate_invalid_bind_address() {
        let mut config = Config::default();
        config.daemon.bind_address = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.daemon.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_switch_name() {
        let mut config = Config::default();
        config.switches.insert(" ".to_string(), "value".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_config_roundtrip() {
        let mut config = Config::default();
        config.daemon.log_level = "debug".to_string();
        config
            .switches
            .insert("widevine-cdm-path".to_string(), "/opt/cdm.so".to_string());

        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, deserialized);
    }
}
