//! Application configuration for the campus events importer.
//!
//! User config lives at `~/.campusevents/campusevents.toml`.
//! CLI flags override config file values, which override defaults.
//! Store secrets are never written to the file; the config only names the
//! environment variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CampusEventsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "campusevents.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".campusevents";

// ---------------------------------------------------------------------------
// Config structs (matching campusevents.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Newsletter page settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Catalog store / persistence sink settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Building resolution settings.
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Interchange file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Newsletter page to scrape.
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Request timeout for the page fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Year applied to the month/day dates on the page. Current year when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_year: Option<i32>,

    /// User-Agent header sent with the fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
            default_year: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_source_url() -> String {
    "https://studentaffairs.virginia.edu/connections#1a".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; UVA-Connections-Scraper/1.0)".into()
}

/// `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the env var holding the service endpoint.
    #[serde(default = "default_url_env")]
    pub url_env: String,

    /// Name of the env var holding the access credential.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Local database file used instead of the remote endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
            token_env: default_token_env(),
            local_path: None,
        }
    }
}

fn default_url_env() -> String {
    "CAMPUSEVENTS_DB_URL".into()
}
fn default_token_env() -> String {
    "CAMPUSEVENTS_DB_TOKEN".into()
}

/// `[resolve]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Building categories never chosen by the random fallback.
    #[serde(default)]
    pub fallback_exclude_categories: Vec<String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Interchange file written by `scrape` and read by `populate`.
    #[serde(default = "default_events_file")]
    pub events_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            events_file: default_events_file(),
        }
    }
}

fn default_events_file() -> String {
    "uva_connections_events.json".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.campusevents/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CampusEventsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.campusevents/campusevents.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CampusEventsError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        CampusEventsError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CampusEventsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CampusEventsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CampusEventsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// Remote store endpoint and credential, read from the environment.
#[derive(Clone)]
pub struct StoreSecrets {
    pub url: String,
    pub token: String,
}

impl std::fmt::Debug for StoreSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSecrets")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Read the store endpoint and credential named by `[store]`.
///
/// Both variables must be set and non-empty; the error names the missing
/// variables but never echoes values.
pub fn validate_store_secrets(config: &AppConfig) -> Result<StoreSecrets> {
    let read = |name: &str| match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => Some(val),
        _ => None,
    };

    let url = read(&config.store.url_env);
    let token = read(&config.store.token_env);

    match (url, token) {
        (Some(url), Some(token)) => Ok(StoreSecrets { url, token }),
        (url, token) => {
            let mut missing = Vec::new();
            if url.is_none() {
                missing.push(config.store.url_env.as_str());
            }
            if token.is_none() {
                missing.push(config.store.token_env.as_str());
            }
            Err(CampusEventsError::config(format!(
                "store credentials not found. Set {} (or configure store.local_path)",
                missing.join(" and ")
            )))
        }
    }
}
