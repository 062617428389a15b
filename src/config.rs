use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::domain::entities::column::ColumnDef;

pub const CONFIG_PATH_ENV: &str = "OVERVIEW_GRID_CONFIG";
pub const DATA_SOURCE_ENV: &str = "OVERVIEW_GRID_DATA_SOURCE";
pub const TOKEN_ENV: &str = "OVERVIEW_GRID_TOKEN";
const CONFIG_FILE_NAME: &str = "overview.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

fn default_title() -> Vec<String> {
    vec!["Overview".to_string()]
}

fn default_with_filter() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: Vec<String>,
    #[serde(default)]
    pub data_source: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_with_filter")]
    pub with_filter: bool,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub filter_field: String,
    #[serde(default)]
    pub loading_text: Option<String>,
    #[serde(default)]
    pub data_end_text: Option<String>,
    #[serde(default)]
    pub default_sorted_field: Option<String>,
    #[serde(default)]
    pub search_placeholder: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_config_path()?,
        };
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Self::from_json("{}")?
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse config json")
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(data_source) = lookup(DATA_SOURCE_ENV).filter(|value| !value.is_empty()) {
            self.data_source = data_source;
        }
        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = token;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_source.trim().is_empty() {
            anyhow::bail!("data source is required (set dataSource or {DATA_SOURCE_ENV})")
        }
        reqwest::Url::parse(&self.data_source).with_context(|| {
            format!(
                "data source must be an absolute URL: {}",
                self.data_source
            )
        })?;
        if self.filter_field.trim().is_empty() {
            anyhow::bail!("filterField is required to send search text")
        }
        if self.columns.is_empty() {
            anyhow::bail!("at least one column is required")
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "overview-grid")
        .ok_or_else(|| anyhow!("unable to resolve project directories"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
