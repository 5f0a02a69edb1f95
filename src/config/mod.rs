//! Load and validate translator configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub mod discovery;
pub mod telemetry;
pub mod translation;

pub use discovery::{
    parse_discovery_section, validate_extension, DiscoverySection, RawDiscoverySection,
    DEFAULT_EXCLUDE_SUFFIX, DEFAULT_EXTENSION, DEFAULT_SKIP_DIRS,
};
pub use translation::{
    parse_translation_section, RawTranslationSection, TranslationMode, TranslationSection,
    DEFAULT_ENDPOINT, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
};

pub const CONFIG_ENV_KEY: &str = "COMMENT_TRANSLATOR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "translator.toml";

/// Where the configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Default,
}

impl ConfigSource {
    /// Explicitly named files must exist; the default one may be absent.
    pub const fn is_explicit(&self) -> bool {
        !matches!(self, ConfigSource::Default)
    }
}

/// Top-level configuration container.
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfig {
    pub translation: TranslationSection,
    pub discovery: DiscoverySection,
    /// File the configuration was read from; `None` when built-in defaults are used.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawTranslatorConfig {
    translation: Option<RawTranslationSection>,
    discovery: Option<RawDiscoverySection>,
}

impl TranslatorConfig {
    /// Load configuration from `path`.
    ///
    /// When the file is absent and `source` is the default location, built-in
    /// defaults are returned instead of an error.
    pub fn load(path: &Path, source: ConfigSource) -> Result<Self, ConfigError> {
        telemetry::log_source(path, source);

        if !path.exists() {
            if source.is_explicit() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            telemetry::log_defaults(path);
            let config = Self::default();
            telemetry::log_loaded(&config);
            return Ok(config);
        }

        Self::load_from_path(path.to_path_buf())
    }

    /// Load configuration from a specific, existing path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(
            config::File::from(path.clone()).format(config::FileFormat::Toml),
        );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "comment_translator::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawTranslatorConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "comment_translator::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "comment_translator::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawTranslatorConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let translation = parse_translation_section(raw.translation, &path)?;
        let discovery = parse_discovery_section(raw.discovery, &path)?;

        Ok(Self {
            translation,
            discovery,
            source_path: Some(path),
        })
    }
}
