use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// User settings read by the save handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Directory prefix for saved documents (may be empty)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Whether saving is switched on
    #[serde(default = "default_is_enabled")]
    pub is_enabled: bool,
}

/// Configuration for the WebDriver-controlled browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Delay after navigation before the page is captured
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Upper bound for navigating to and capturing one page
    #[serde(default = "default_capture_timeout_secs")]
    pub capture_timeout_secs: u64,
}

/// Default value for save_directory
fn default_save_directory() -> String {
    "Scraper/Output".to_string()
}

/// Default value for is_enabled
fn default_is_enabled() -> bool {
    true
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for settle_delay_ms
fn default_settle_delay_ms() -> u64 {
    1000
}

/// Default value for capture_timeout_secs
fn default_capture_timeout_secs() -> u64 {
    45
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            is_enabled: default_is_enabled(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            settle_delay_ms: default_settle_delay_ms(),
            capture_timeout_secs: default_capture_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            ::log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Write settings as JSON, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| config_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| config_error(path, e))
    }
}

impl BrowserConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment
    /// variable if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
    let value = serde_json::from_str(&contents)?;
    Ok(value)
}

fn config_error(path: &Path, err: std::io::Error) -> ScrapeError {
    ScrapeError::Config(format!("{}: {}", path.display(), err))
}
