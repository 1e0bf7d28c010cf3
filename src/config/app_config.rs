use std::env;
use std::path::Path;
use std::str::FromStr;

use reqwest::Client;

use super::probe_config::Settings;
use crate::error::ConfigError;

const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Load the run settings from a YAML file and environment variables.
/// The file is located by the `CONFIG_FILE` environment variable and defaults to `config.yml`.
/// A missing default file is not an error: every setting has a default. A file named
/// explicitly through `CONFIG_FILE` must exist.
/// Environment variables are applied on top of the file, see [`apply_env_overrides`].
pub fn load_settings() -> Result<Settings, ConfigError> {
    let explicit = env::var("CONFIG_FILE").ok();
    let location = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let settings = if explicit.is_none() && !Path::new(&location).exists() {
        log::debug!("No {} found, using default settings", location);
        Settings::default()
    } else {
        read_settings_file(&location)?
    };

    let settings = apply_env_overrides(settings, |key| env::var(key).ok())?;
    validate(&settings)?;

    log::info!(
        "Using source {} (concurrency: {}, timeout: {}s, top: {})",
        settings.source_url,
        settings.max_concurrent_requests,
        settings.timeout_seconds,
        settings.top_n
    );

    Ok(settings)
}

pub fn read_settings_file(location: &str) -> Result<Settings, ConfigError> {
    let config_str = std::fs::read_to_string(location).map_err(|source| ConfigError::Read {
        path: location.to_string(),
        source,
    })?;

    // An empty file deserializes as YAML null rather than an empty mapping.
    if config_str.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Yaml {
        path: location.to_string(),
        source,
    })
}

/// Override settings with environment variables.
///
/// | variable                  | setting                   |
/// |---------------------------|---------------------------|
/// | `MIRROR_SOURCE_URL`       | `source_url`              |
/// | `MIRROR_STATUS_FILTER`    | `status_filter`           |
/// | `MAX_CONCURRENT_REQUESTS` | `max_concurrent_requests` |
/// | `PROBE_TIMEOUT_SECONDS`   | `timeout_seconds`         |
/// | `TOP_N`                   | `top_n`                   |
/// | `ACCEPTED_STATUS_CODE`    | `accepted_status_code`    |
/// | `PROBE_USER_AGENT`        | `user_agent`              |
///
/// `lookup` resolves a variable name to its value, which keeps this testable without
/// touching the process environment.
pub fn apply_env_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("MIRROR_SOURCE_URL") {
        settings.source_url = url;
    }
    if let Some(filter) = lookup("MIRROR_STATUS_FILTER") {
        settings.status_filter = filter;
    }
    if let Some(agent) = lookup("PROBE_USER_AGENT") {
        settings.user_agent = agent;
    }
    if let Some(value) = parse_env(&lookup, "MAX_CONCURRENT_REQUESTS")? {
        settings.max_concurrent_requests = value;
    }
    if let Some(value) = parse_env(&lookup, "PROBE_TIMEOUT_SECONDS")? {
        settings.timeout_seconds = value;
    }
    if let Some(value) = parse_env(&lookup, "TOP_N")? {
        settings.top_n = value;
    }
    if let Some(value) = parse_env(&lookup, "ACCEPTED_STATUS_CODE")? {
        settings.accepted_status_code = value;
    }
    Ok(settings)
}

fn parse_env<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidEnv {
            key: key.to_string(),
            value,
            reason: e.to_string(),
        })
}

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.max_concurrent_requests == 0 {
        return Err(ConfigError::Invalid(
            "max_concurrent_requests must be at least 1".to_string(),
        ));
    }
    if settings.timeout_seconds == 0 {
        return Err(ConfigError::Invalid(
            "timeout_seconds must be greater than 0".to_string(),
        ));
    }
    if settings.top_n == 0 {
        return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
    }
    Ok(())
}

/// Setup the HTTP client shared by the directory fetch and every probe.
/// Timeouts are enforced per probe, so the client itself carries none.
pub fn setup_client(settings: &Settings) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(&settings.user_agent).build()
}
