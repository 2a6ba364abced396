//! Configuration for the viewer glue using the prefer crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay between status checks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
/// Default duration of the focus emphasis flash in milliseconds.
pub const DEFAULT_FOCUS_FLASH_MS: u64 = 2000;

/// Viewer settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the document API.
    pub endpoint: String,
    /// Delay between status checks in milliseconds.
    pub poll_interval_ms: u64,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Duration of the focus emphasis flash in milliseconds.
    pub focus_flash_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout: 30,
            user_agent: "AnomalyViewer/0.3".to_string(),
            focus_flash_ms: DEFAULT_FOCUS_FLASH_MS,
        }
    }
}

impl Settings {
    /// Create settings for a specific API endpoint.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..Default::default()
        }
    }

    /// Delay between status checks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Duration of the focus emphasis flash.
    pub fn focus_flash(&self) -> Duration {
        Duration::from_millis(self.focus_flash_ms)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the document API.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Delay between status checks in milliseconds.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Duration of the focus emphasis flash in milliseconds.
    #[serde(default)]
    pub focus_flash_ms: Option<u64>,
}

impl Config {
    /// Load configuration using prefer crate.
    /// Automatically discovers anomaly-viewer config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("anomaly-viewer").await {
            Ok(pref_config) => {
                let endpoint: Option<String> = pref_config.get("endpoint").ok();
                let poll_interval_ms: Option<u64> =
                    pref_config.get("poll_interval_ms").ok();
                let request_timeout: Option<u64> = pref_config.get("request_timeout").ok();
                let user_agent: Option<String> = pref_config.get("user_agent").ok();
                let focus_flash_ms: Option<u64> = pref_config.get("focus_flash_ms").ok();

                Config {
                    endpoint,
                    poll_interval_ms,
                    request_timeout,
                    user_agent,
                    focus_flash_ms,
                }
            }
            Err(_) => {
                // No config file found, use defaults
                Self::default()
            }
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref endpoint) = self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(interval) = self.poll_interval_ms {
            settings.poll_interval_ms = interval;
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(flash) = self.focus_flash_ms {
            settings.focus_flash_ms = flash;
        }
    }
}

/// Load settings from configuration (async version).
pub async fn load_settings() -> Settings {
    let config = Config::load().await;
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    settings
}
