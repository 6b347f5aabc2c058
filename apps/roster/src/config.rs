use std::{fs, path::Path};

use anyhow::{bail, Context};
use roster_core::{DEFAULT_SOURCE_URL, DEFAULT_SPLIT_YEAR};
use serde::Deserialize;
use shared::{domain::UserRecord, protocol::UsersResponse};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_url: String,
    pub split_year: i32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.into(),
            split_year: DEFAULT_SPLIT_YEAR,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    source_url: Option<String>,
    split_year: Option<i32>,
    log_filter: Option<String>,
}

/// Defaults, then `path` if it exists and parses, then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            apply_file_settings(&mut settings, file_cfg);
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.source_url {
        settings.source_url = v;
    }
    if let Some(v) = file_cfg.split_year {
        settings.split_year = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ROSTER_SOURCE_URL") {
        settings.source_url = v;
    }
    if let Some(v) = lookup("APP__SOURCE_URL") {
        settings.source_url = v;
    }

    if let Some(v) = lookup("APP__SPLIT_YEAR") {
        if let Ok(parsed) = v.trim().parse::<i32>() {
            settings.split_year = parsed;
        }
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

pub fn validate_source_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid source url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("source url '{raw}' must use http or https");
    }
    Ok(url)
}

/// Reads a saved directory page (same shape as the remote response).
pub fn load_fixture(path: &Path) -> anyhow::Result<Vec<UserRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture '{}'", path.display()))?;
    let page: UsersResponse = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse fixture '{}'", path.display()))?;
    Ok(page.into_records())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
