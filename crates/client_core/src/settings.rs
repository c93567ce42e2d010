use std::{collections::HashMap, fs, path::Path};

use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `client.toml` in the working directory, then the process environment.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("backend_url") {
                    settings.backend_url = v.clone();
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(err) => {
                tracing::warn!(file = %file.display(), error = %err, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings.backend_url = normalize_backend_url(&settings.backend_url)?;
    Ok(settings)
}

impl ClientSettings {
    /// Applies a command-line override on top of the loaded settings.
    pub fn with_backend_url(mut self, backend_url: Option<&str>) -> Result<Self, SettingsError> {
        if let Some(raw) = backend_url {
            self.backend_url = normalize_backend_url(raw)?;
        }
        Ok(self)
    }
}

pub fn normalize_backend_url(raw_backend_url: &str) -> Result<String, SettingsError> {
    let trimmed = raw_backend_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_BACKEND_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|source| SettingsError::InvalidBackendUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme {
            url: trimmed.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
