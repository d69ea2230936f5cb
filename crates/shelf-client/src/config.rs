//! # Client Configuration
//!
//! Where the backend lives and how amounts are shown.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHELF_API_BASE_URL=http://192.168.3.192:3001                       │
//! │     SHELF_API_TIMEOUT_SECS=10                                          │
//! │     SHELF_CURRENCY_SYMBOL=€                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $SHELF_CONFIG, or                                                  │
//! │     ~/.config/shelf-pos/admin.toml (Linux)                             │
//! │     ~/Library/Application Support/com.shelf.pos/admin.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3001"
//! timeout_secs = 30
//! categories_path = "/api/categories"
//! manufacturers_path = "/api/manufacturers"
//! upload_path = "/api/upload"
//!
//! [display]
//! currency_symbol = "€"
//! ```

use serde::{Deserialize, Serialize};
use shelf_core::Money;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Backend location and endpoint paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the backend. Uploaded image paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_categories_path")]
    pub categories_path: String,

    #[serde(default = "default_manufacturers_path")]
    pub manufacturers_path: String,

    #[serde(default = "default_upload_path")]
    pub upload_path: String,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_categories_path() -> String {
    "/api/categories".to_string()
}

fn default_manufacturers_path() -> String {
    "/api/manufacturers".to_string()
}

fn default_upload_path() -> String {
    "/api/upload".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            categories_path: default_categories_path(),
            manufacturers_path: default_manufacturers_path(),
            upload_path: default_upload_path(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (admin.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`ClientConfig::load`] with the variable lookup supplied by the
    /// caller instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let base = Url::parse(&self.api.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        for path in [
            &self.api.categories_path,
            &self.api.manufacturers_path,
            &self.api.upload_path,
        ] {
            if !path.starts_with('/') {
                return Err(ClientError::InvalidConfig(format!(
                    "endpoint path must start with '/', got: {path}"
                )));
            }
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ClientConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SHELF_API_BASE_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("SHELF_API_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring unparsable SHELF_API_TIMEOUT_SECS"),
            }
        }

        if let Some(symbol) = lookup("SHELF_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("SHELF_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "shelf", "pos")
            .map(|dirs| dirs.config_dir().join("admin.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Absolute URL of a backend endpoint path.
    ///
    /// The path is appended to the base URL, so a backend mounted under a
    /// prefix (`http://host/backend`) keeps it.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&self.under_base(path))?)
    }

    /// Turns a path returned by the upload endpoint into a full URL by
    /// prefixing the base URL. Absolute URLs pass through unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_client::ClientConfig;
    ///
    /// let config = ClientConfig::default();
    /// assert_eq!(
    ///     config.asset_url("/uploads/t_123.jpg"),
    ///     "http://localhost:3001/uploads/t_123.jpg"
    /// );
    /// assert_eq!(
    ///     config.asset_url("https://cdn.example.com/a.jpg"),
    ///     "https://cdn.example.com/a.jpg"
    /// );
    /// ```
    pub fn asset_url(&self, path: &str) -> String {
        if Url::parse(path).is_ok() {
            return path.to_string();
        }

        self.under_base(path)
    }

    fn under_base(&self, path: &str) -> String {
        let base = self.api.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_client::ClientConfig;
    /// use shelf_core::Money;
    ///
    /// let config = ClientConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "€12.34");
    /// assert_eq!(config.format_currency(Money::from_cents(-50)), "-€0.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let digits = amount.to_string();
        let magnitude = digits.trim_start_matches('-');
        format!("{}{}{}", sign, self.display.currency_symbol, magnitude)
    }
}
