//! Configuration management
//!
//! Settings live in `settings.json` in the finboard directory:
//! ```json
//! {
//!   "app": { "demoMode": false },
//!   "api": { "baseUrl": "http://localhost:3333", "timeoutSecs": 30 },
//!   "display": { "currency": "BRL" }
//! }
//! ```
//! Keys the CLI doesn't manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::domain::Currency;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "FINBOARD_API_URL";

/// Environment variable overriding demo mode (for CI/testing)
pub const DEMO_MODE_ENV: &str = "FINBOARD_DEMO_MODE";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    display: DisplaySettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisplaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
}

/// Finboard configuration (simplified view of settings)
///
/// `api_base_url` and `demo_mode` are the effective values, environment
/// overrides included. `save` never writes an override back to disk.
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub currency: Currency,
    overrides: EnvOverrides,
    stored: StoredValues,
}

/// Values taken from the environment at load time
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    api_base_url: Option<String>,
    demo_mode: Option<bool>,
}

/// Overridable values as they were read from settings.json
#[derive(Debug, Clone, Default)]
struct StoredValues {
    api_base_url: Option<String>,
    demo_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            currency: Currency::default(),
            overrides: EnvOverrides::default(),
            stored: StoredValues::default(),
        }
    }
}

impl Config {
    /// Load config from the finboard directory
    ///
    /// Environment overrides (applied after the file):
    /// - `FINBOARD_API_URL` replaces the API base URL
    /// - `FINBOARD_DEMO_MODE` forces demo mode on or off
    pub fn load(finboard_dir: &Path) -> Result<Self> {
        Self::load_with_env(finboard_dir, |key| std::env::var(key).ok())
    }

    fn load_with_env(finboard_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = read_settings(finboard_dir)?;

        let currency = match raw.display.currency.as_deref() {
            Some(code) => Currency::from_code(code)?,
            None => Currency::default(),
        };

        let overrides = EnvOverrides {
            api_base_url: match env(API_URL_ENV) {
                Some(url) if !url.trim().is_empty() => Some(
                    normalize_base_url(&url)
                        .with_context(|| format!("Invalid {} value", API_URL_ENV))?,
                ),
                _ => None,
            },
            demo_mode: match env(DEMO_MODE_ENV).as_deref() {
                Some("true" | "1" | "yes" | "TRUE" | "YES") => Some(true),
                Some("false" | "0" | "no" | "FALSE" | "NO") => Some(false),
                _ => None,
            },
        };
        let stored = StoredValues {
            api_base_url: raw.api.base_url.clone(),
            demo_mode: raw.app.demo_mode,
        };

        Ok(Self {
            demo_mode: overrides.demo_mode.unwrap_or(stored.demo_mode),
            api_base_url: overrides
                .api_base_url
                .clone()
                .or_else(|| stored.api_base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            currency,
            overrides,
            stored,
        })
    }

    /// Save config to the finboard directory
    ///
    /// Preserves other settings that the CLI doesn't manage. A value that
    /// still equals its environment override is saved as the file had it.
    pub fn save(&self, finboard_dir: &Path) -> Result<()> {
        let settings_path = finboard_dir.join("settings.json");
        let mut settings = read_settings(finboard_dir)?;

        settings.app.demo_mode = if self.overrides.demo_mode == Some(self.demo_mode) {
            self.stored.demo_mode
        } else {
            self.demo_mode
        };
        settings.api.base_url =
            if self.overrides.api_base_url.as_deref() == Some(self.api_base_url.as_str()) {
                self.stored.api_base_url.clone()
            } else {
                Some(self.api_base_url.clone())
            };
        settings.api.timeout_secs = Some(self.timeout_secs);
        settings.display.currency = Some(self.currency.code().to_string());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }

    /// Set the API base URL; only absolute http(s) URLs without a query or
    /// fragment are accepted
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.api_base_url = normalize_base_url(base_url)?;
        self.overrides.api_base_url = None;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
        self.overrides.demo_mode = None;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
        self.overrides.demo_mode = None;
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url.trim())
        .with_context(|| format!("Invalid API URL: {}", base_url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("API URL must use http or https, got '{}'", parsed.scheme());
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        anyhow::bail!("API URL must not contain a query or fragment: {}", base_url);
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn read_settings(finboard_dir: &Path) -> Result<SettingsFile> {
    let settings_path = finboard_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", settings_path.display()))
}
