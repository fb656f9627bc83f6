//! Configuration file support for wp-plugin-compat.
//!
//! Provides YAML-based configuration through `wp-plugin-compat.config.yml`
//! files, including data structures, file loading, validation, and the
//! resolved [`Settings`] the binary wires its adapters from.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::outbound::network::{
    DEFAULT_PORTAL_API_URL, DEFAULT_WPORG_API_URL, DEFAULT_WPTIDE_API_URL,
};
use crate::adapters::outbound::storage::DEFAULT_STATE_DIR;
use crate::application::use_cases::{DEFAULT_CONCURRENCY, DEFAULT_POLL_INTERVAL};
use crate::compat_check::domain::{Capability, Operator, Scope};
use crate::compat_check::services::DEFAULT_STANDARD;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "wp-plugin-compat.config.yml";

const DEFAULT_CACHE_TTL_HOURS: u64 = 6;

/// Upper bound for `cache_ttl_hours` (one year)
const MAX_CACHE_TTL_HOURS: u64 = 24 * 366;

/// Upper bound for `poll_interval_minutes` (one week)
const MAX_POLL_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub site_url: Option<String>,
    pub default_scope: Option<String>,
    pub cache_ttl_hours: Option<u64>,
    pub poll_interval_minutes: Option<u64>,
    pub concurrency: Option<usize>,
    pub state_dir: Option<PathBuf>,
    pub active_plugins: Option<Vec<String>>,
    pub network_active_plugins: Option<Vec<String>>,
    pub php_version: Option<String>,
    pub wporg_api_url: Option<String>,
    pub wptide_api_url: Option<String>,
    pub portal_api_url: Option<String>,
    pub portal_standard: Option<String>,
    pub capabilities: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in the site directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn require_positive(field: &str, value: Option<u64>) -> Result<()> {
    if value == Some(0) {
        bail!(
            "Invalid config: {} must be greater than zero.\n\n💡 Hint: Remove the field to use the default.",
            field
        );
    }
    Ok(())
}

fn require_at_most(field: &str, value: Option<u64>, max: u64) -> Result<()> {
    if let Some(value) = value {
        if value > max {
            bail!(
                "Invalid config: {} must be at most {} (got {}).",
                field,
                max,
                value
            );
        }
    }
    Ok(())
}

fn require_url(field: &str, value: Option<&String>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim().is_empty() {
        bail!("Invalid config: {} must not be empty.", field);
    }
    url::Url::parse(value.trim())
        .with_context(|| format!("Invalid config: {} is not a valid URL: {}", field, value))?;
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    require_positive("cache_ttl_hours", config.cache_ttl_hours)?;
    require_positive("poll_interval_minutes", config.poll_interval_minutes)?;
    require_positive("concurrency", config.concurrency.map(|c| c as u64))?;
    require_at_most("cache_ttl_hours", config.cache_ttl_hours, MAX_CACHE_TTL_HOURS)?;
    require_at_most(
        "poll_interval_minutes",
        config.poll_interval_minutes,
        MAX_POLL_INTERVAL_MINUTES,
    )?;

    require_url("wporg_api_url", config.wporg_api_url.as_ref())?;
    require_url("wptide_api_url", config.wptide_api_url.as_ref())?;
    require_url("portal_api_url", config.portal_api_url.as_ref())?;

    if let Some(ref site_url) = config.site_url {
        if site_url.trim().is_empty() {
            bail!("Invalid config: site_url must not be empty.");
        }
    }

    if let Some(ref standard) = config.portal_standard {
        if standard.trim().is_empty() {
            bail!("Invalid config: portal_standard must not be empty.");
        }
    }

    if let Some(ref scope) = config.default_scope {
        scope
            .parse::<Scope>()
            .map_err(|e| anyhow::anyhow!("Invalid config: default_scope: {}", e))?;
    }

    if let Some(ref capabilities) = config.capabilities {
        for (i, capability) in capabilities.iter().enumerate() {
            capability.parse::<Capability>().map_err(|e| {
                anyhow::anyhow!(
                    "Invalid config: capabilities[{}]: {}\n\n\
                     💡 Hint: Use 'manage_options' and/or 'manage_network'.",
                    i,
                    e
                )
            })?;
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings after applying defaults to a config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub site_url: Option<String>,
    pub default_scope: Scope,
    pub cache_ttl: Duration,
    pub poll_interval: Duration,
    pub concurrency: usize,
    /// Absolute, or relative to the site root
    pub state_dir: PathBuf,
    pub active_plugins: Vec<String>,
    pub network_active_plugins: Vec<String>,
    pub php_version: Option<String>,
    pub wporg_api_url: String,
    pub wptide_api_url: String,
    pub portal_api_url: String,
    pub portal_standard: String,
    pub operator: Operator,
}

impl Settings {
    /// Fills every unset field with its default
    ///
    /// Assumes `config` went through validation; unparseable or
    /// overflowing values fall back to the defaults.
    pub fn from_config(config: ConfigFile, site_root: &Path) -> Self {
        let default_scope = config
            .default_scope
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Scope::Site);

        let operator = match config.capabilities {
            Some(capabilities) => Operator::new(
                capabilities
                    .iter()
                    .filter_map(|c| c.parse::<Capability>().ok()),
            ),
            None => Operator::administrator(),
        };

        let state_dir = config
            .state_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
        let state_dir = if state_dir.is_absolute() {
            state_dir
        } else {
            site_root.join(state_dir)
        };

        Self {
            site_url: config.site_url.map(|s| s.trim().to_string()),
            default_scope,
            cache_ttl: config
                .cache_ttl_hours
                .and_then(|h| h.checked_mul(60 * 60))
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(DEFAULT_CACHE_TTL_HOURS * 60 * 60)),
            poll_interval: config
                .poll_interval_minutes
                .and_then(|m| m.checked_mul(60))
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            concurrency: config.concurrency.unwrap_or(DEFAULT_CONCURRENCY),
            state_dir,
            active_plugins: config.active_plugins.unwrap_or_default(),
            network_active_plugins: config.network_active_plugins.unwrap_or_default(),
            php_version: config.php_version,
            wporg_api_url: config
                .wporg_api_url
                .unwrap_or_else(|| DEFAULT_WPORG_API_URL.to_string()),
            wptide_api_url: config
                .wptide_api_url
                .unwrap_or_else(|| DEFAULT_WPTIDE_API_URL.to_string()),
            portal_api_url: config
                .portal_api_url
                .unwrap_or_else(|| DEFAULT_PORTAL_API_URL.to_string()),
            portal_standard: config
                .portal_standard
                .unwrap_or_else(|| DEFAULT_STANDARD.to_string()),
            operator,
        }
    }
}
