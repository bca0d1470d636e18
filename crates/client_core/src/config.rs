use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::protocol::SCRAPE_JOBS_PATH;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8000".into(),
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid service url '{url}': {source}")]
    InvalidServiceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("service url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL of the scrape endpoint, validated.
    pub fn scrape_jobs_url(&self) -> Result<Url, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let base = normalize_service_url(&self.service_url);
        let url = Url::parse(&format!("{base}{SCRAPE_JOBS_PATH}")).map_err(|source| {
            ConfigError::InvalidServiceUrl {
                url: self.service_url.clone(),
                source,
            }
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::UnsupportedScheme(self.service_url.clone())),
        }
    }
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, Path::new(DEFAULT_SETTINGS_FILE));
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn apply_file_overrides(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };

    match toml::from_str::<SettingsFile>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.service_url {
                settings.service_url = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout_secs = v;
            }
        }
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable settings file: {err}");
        }
    }
}

pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("JOB_SEARCH_URL") {
        settings.service_url = v;
    }
    if let Some(v) = lookup("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}

fn normalize_service_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().service_url;
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
