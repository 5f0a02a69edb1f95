use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_EXTENSION: &str = "cs";
pub const DEFAULT_EXCLUDE_SUFFIX: &str = "Designer.cs";
pub const DEFAULT_SKIP_DIRS: &[&str] = &["obj"];

/// Rules used by the `discover` command.
#[derive(Debug, Clone)]
pub struct DiscoverySection {
    pub extension: String,
    pub exclude_suffix: String,
    pub skip_dirs: Vec<String>,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            exclude_suffix: DEFAULT_EXCLUDE_SUFFIX.to_string(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawDiscoverySection {
    pub extension: Option<String>,
    pub exclude_suffix: Option<String>,
    pub skip_dirs: Option<Vec<String>>,
}

pub fn parse_discovery_section(
    raw: Option<RawDiscoverySection>,
    path: &Path,
) -> Result<DiscoverySection, ConfigError> {
    let raw = raw.unwrap_or_default();

    let extension = raw
        .extension
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    validate_extension(path, &extension)?;

    let exclude_suffix = raw
        .exclude_suffix
        .unwrap_or_else(|| DEFAULT_EXCLUDE_SUFFIX.to_string());

    let skip_dirs = raw
        .skip_dirs
        .unwrap_or_else(|| DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect());
    validate_skip_dirs(path, &skip_dirs)?;

    Ok(DiscoverySection {
        extension,
        exclude_suffix,
        skip_dirs,
    })
}

/// Reject empty extensions and ones written with a leading dot.
pub fn validate_extension(path: &Path, extension: &str) -> Result<(), ConfigError> {
    if extension.trim().is_empty() || extension.starts_with('.') {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "discovery.extension",
            message: format!("Give the extension without a leading dot: {extension:?}"),
        });
    }
    Ok(())
}

fn validate_skip_dirs(path: &Path, skip_dirs: &[String]) -> Result<(), ConfigError> {
    for dir in skip_dirs {
        if dir.trim().is_empty() || dir.contains(['/', '\\']) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "discovery.skip_dirs",
                message: format!("Entries must be single directory names: {dir:?}"),
            });
        }
    }
    Ok(())
}
