use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Manifest used when nothing else is configured.
pub const DEFAULT_METADATA_URI: &str =
    "https://raw.githubusercontent.com/luxass/vscode-schemas/main/schemas/.vscode-schemas.json";

/// Output directory (relative to the workspace) used when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "./extracted-schemas";

/// Repository whose `extensions/<name>/...` schemas are written as `<name>/<file>`.
pub const DEFAULT_EXTENSION_REPO: &str = "vscode";

/// Read-only view of the host's settings store.
///
/// Implementations return `None` for keys that are not set; an empty string
/// is treated the same as an unset key by [`RunSettings::resolve`].
pub trait ConfigProvider {
    fn metadata_uri(&self) -> Option<String>;
    fn release_list(&self) -> Option<String>;
    fn output(&self) -> Option<String>;
}

/// Global configuration loaded from `~/.config/schext/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchextConfig {
    /// Manifest location (http, https, file URL, or path relative to the workspace).
    #[serde(default)]
    pub metadata_uri: Option<String>,
    /// Optional list of named releases, each pointing at a manifest.
    #[serde(default)]
    pub release_list: Option<String>,
    /// Output directory, relative to the workspace unless absolute.
    #[serde(default)]
    pub output: Option<String>,
    /// Directory holding the documents served under `vscode://schemas/...`.
    /// If missing, `~/.local/share/schext/schemas` is used.
    #[serde(default)]
    pub schema_store: Option<PathBuf>,
    /// Repository name recognized for per-extension output naming.
    #[serde(default = "default_extension_repo")]
    pub extension_repo: String,
    /// Upper bound on schema fetches in flight at once.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// TCP connect timeout for HTTP requests, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_extension_repo() -> String {
    DEFAULT_EXTENSION_REPO.to_string()
}

fn default_max_concurrent_fetches() -> usize {
    16
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for SchextConfig {
    fn default() -> Self {
        Self {
            metadata_uri: Some(DEFAULT_METADATA_URI.to_string()),
            release_list: None,
            output: Some(DEFAULT_OUTPUT.to_string()),
            schema_store: None,
            extension_repo: default_extension_repo(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl SchextConfig {
    /// Directory backing `vscode://schemas/...`, falling back to the XDG data dir.
    pub fn schema_store_dir(&self) -> Result<PathBuf> {
        match &self.schema_store {
            Some(dir) => Ok(dir.clone()),
            None => {
                let xdg_dirs = xdg::BaseDirectories::with_prefix("schext")?;
                Ok(xdg_dirs.get_data_home().join("schext").join("schemas"))
            }
        }
    }
}

impl ConfigProvider for SchextConfig {
    fn metadata_uri(&self) -> Option<String> {
        self.metadata_uri.clone()
    }

    fn release_list(&self) -> Option<String> {
        self.release_list.clone()
    }

    fn output(&self) -> Option<String> {
        self.output.clone()
    }
}

/// Settings for one run after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub metadata_uri: String,
    pub release_list: Option<String>,
    pub output: String,
}

impl RunSettings {
    /// Reads the provider and fills unset or empty keys with the built-in defaults.
    pub fn resolve(provider: &dyn ConfigProvider) -> Self {
        Self {
            metadata_uri: non_empty(provider.metadata_uri())
                .unwrap_or_else(|| DEFAULT_METADATA_URI.to_string()),
            release_list: non_empty(provider.release_list()),
            output: non_empty(provider.output()).unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("schext")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SchextConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SchextConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SchextConfig = toml::from_str(&data)?;
    Ok(cfg)
}
