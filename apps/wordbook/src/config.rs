use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use client_core::{
    LookupConfig, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SAVED_DELIMITER,
};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "wordbook.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    /// `None` lets the service pick its own limit.
    pub max_results: Option<u32>,
    /// 0 disables the request timeout.
    pub request_timeout_secs: u64,
    pub saved_delimiter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            max_results: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            saved_delimiter: DEFAULT_SAVED_DELIMITER.into(),
        }
    }
}

impl Settings {
    pub fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            base_url: self.api_base_url.clone(),
            max_results: self.max_results,
            timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
        }
    }

    pub fn set_max_results(&mut self, max: u32) {
        // 0 means "no explicit limit".
        self.max_results = (max > 0).then_some(max);
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    max_results: Option<u32>,
    request_timeout_secs: Option<u64>,
    saved_delimiter: Option<String>,
}

/// Defaults, then the config file, then environment overrides.
///
/// A missing default file is fine; a missing file passed explicitly is not.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_with(
    explicit_path: Option<&Path>,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(error) if error.kind() == io::ErrorKind::NotFound && explicit_path.is_none() => {}
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    }

    apply_env_overrides(&mut settings, var);
    Ok(settings)
}

/// Command-line flags are the last layer.
pub fn apply_cli_overrides(settings: &mut Settings, base_url: Option<String>, max: Option<u32>) {
    if let Some(base_url) = base_url {
        settings.api_base_url = base_url;
    }
    if let Some(max) = max {
        settings.set_max_results(max);
    }
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.max_results {
        settings.set_max_results(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.saved_delimiter {
        settings.saved_delimiter = v;
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("WORDBOOK_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("APP__MAX_RESULTS") {
        match v.parse::<u32>() {
            Ok(parsed) => settings.set_max_results(parsed),
            Err(error) => warn!(value = %v, %error, "ignoring APP__MAX_RESULTS"),
        }
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(error) => warn!(value = %v, %error, "ignoring APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = var("APP__SAVED_DELIMITER") {
        settings.saved_delimiter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
