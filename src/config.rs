// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::PropertySpec;
use crate::storage::LocalStorage;
use anyhow::{Error, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;

fn default_user_agent() -> String {
    format!("Turnover/{}", env!("CARGO_PKG_VERSION"))
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_concurrent_fetches() -> usize {
    4
}
fn default_max_redirects() -> usize {
    5
}

/// Shown when no config file exists yet.
pub const SAMPLE_CONFIG: &str = r##"# Optional CORS-style proxy; feeds are requested as <proxy_url>?url=<feed url>
# proxy_url = "https://example.org/api/ical-proxy"

[[properties]]
id = "studio"
name = "The Studio"
color = "#8b5cf6"
calendars = [
    { label = "Airbnb", url = "https://www.airbnb.com/calendar/ical/XXXX.ics?t=YYYY" },
    { label = "Booking.com", url = "https://ical.booking.com/v1/export?t=ZZZZ" },
]
"##;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_url: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            max_redirects: default_max_redirects(),
            properties: Vec::new(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Property ids must be present and unique; everything else has a default.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for property in &self.properties {
            if property.id.trim().is_empty() {
                bail!("Property '{}' has an empty id", property.name);
            }
            if !seen.insert(property.id.as_str()) {
                bail!("Duplicate property id '{}'", property.id);
            }
        }
        Ok(())
    }

    pub fn property(&self, id: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        Self::from_toml_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {:#}", path.display(), e)
        })
    }

    /// Whether `err` means "there is no config file yet".
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        self.validate()?;
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
