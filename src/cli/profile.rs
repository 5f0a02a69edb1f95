//! Config path and auth key resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::{ConfigSource, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub const AUTH_KEY_ENV: &str = "DEEPL_AUTH_KEY";

/// Where the DeepL auth key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKeySource {
    Cli,
    Env,
    Config,
    Missing,
}

impl AuthKeySource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthKeySource::Cli => "cli",
            AuthKeySource::Env => "env",
            AuthKeySource::Config => "config",
            AuthKeySource::Missing => "missing",
        }
    }
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<(PathBuf, ConfigSource)> {
    let (path, source) = match override_path {
        Some(path) => (path, ConfigSource::Cli),
        None => match env::var_os(CONFIG_ENV_KEY) {
            Some(path) if !path.is_empty() => (PathBuf::from(path), ConfigSource::Env),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigSource::Default),
        },
    };

    if path.is_absolute() {
        return Ok((path, source));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok((cwd.join(path), source))
}

/// Resolve the auth key in the order: CLI override → env var → config file.
pub fn resolve_auth_key(
    key_override: Option<String>,
    configured: Option<String>,
) -> (Option<String>, AuthKeySource) {
    pick_auth_key(key_override, env::var(AUTH_KEY_ENV).ok(), configured)
}

fn pick_auth_key(
    cli: Option<String>,
    env_value: Option<String>,
    configured: Option<String>,
) -> (Option<String>, AuthKeySource) {
    [
        (cli, AuthKeySource::Cli),
        (env_value, AuthKeySource::Env),
        (configured, AuthKeySource::Config),
    ]
    .into_iter()
    .find_map(|(value, source)| normalize_key(value).map(|key| (Some(key), source)))
    .unwrap_or((None, AuthKeySource::Missing))
}

fn normalize_key(raw: Option<String>) -> Option<String> {
    let trimmed = raw?.trim().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}
