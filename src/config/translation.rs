use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lib::errors::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
pub const DEFAULT_SOURCE_LANG: &str = "ZH";
pub const DEFAULT_TARGET_LANG: &str = "EN-US";
pub const DEFAULT_REPLACE_MODE: bool = true;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How a translation is rendered next to (or instead of) the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranslationMode {
    /// Only the translation is kept.
    Replace,
    /// The original text is kept and followed by its translation.
    Append,
}

impl TranslationMode {
    pub const fn from_replace_flag(replace_mode: bool) -> Self {
        if replace_mode {
            TranslationMode::Replace
        } else {
            TranslationMode::Append
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TranslationMode::Replace => "Replace",
            TranslationMode::Append => "Append",
        }
    }
}

/// Translation backend and rewrite settings.
#[derive(Debug, Clone)]
pub struct TranslationSection {
    pub auth_key: Option<String>,
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
    pub mode: TranslationMode,
    /// Rewrite processed files in place. Defaults to on in Replace mode only.
    pub write_output: bool,
    pub timeout_secs: u64,
}

impl Default for TranslationSection {
    fn default() -> Self {
        Self {
            auth_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            mode: TranslationMode::from_replace_flag(DEFAULT_REPLACE_MODE),
            write_output: DEFAULT_REPLACE_MODE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTranslationSection {
    pub auth_key: Option<String>,
    pub endpoint: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub replace_mode: Option<bool>,
    pub write_output: Option<bool>,
    pub timeout_secs: Option<u64>,
}

pub fn parse_translation_section(
    raw: Option<RawTranslationSection>,
    path: &Path,
) -> Result<TranslationSection, ConfigError> {
    let raw = raw.unwrap_or_default();

    let auth_key = raw.auth_key.filter(|value| !value.trim().is_empty());

    let endpoint = raw
        .endpoint
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_endpoint(path, &endpoint)?;

    let source_lang = raw
        .source_lang
        .unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string());
    validate_lang_code(path, "translation.source_lang", &source_lang)?;

    let target_lang = raw
        .target_lang
        .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string());
    validate_lang_code(path, "translation.target_lang", &target_lang)?;

    let replace_mode = raw.replace_mode.unwrap_or(DEFAULT_REPLACE_MODE);
    let write_output = raw.write_output.unwrap_or(replace_mode);

    let timeout_secs = raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    validate_timeout(path, timeout_secs)?;

    Ok(TranslationSection {
        auth_key,
        endpoint,
        source_lang,
        target_lang,
        mode: TranslationMode::from_replace_flag(replace_mode),
        write_output,
        timeout_secs,
    })
}

fn validate_endpoint(path: &Path, endpoint: &str) -> Result<(), ConfigError> {
    let trimmed = endpoint.trim();
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "translation.endpoint",
        message: format!("Provide an http(s) URL: {endpoint}"),
    })
}

fn validate_lang_code(path: &Path, field: &'static str, code: &str) -> Result<(), ConfigError> {
    let valid = !code.is_empty()
        && code.len() <= 16
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message: format!("Language codes use ASCII letters, digits and '-': {code:?}"),
    })
}

fn validate_timeout(path: &Path, secs: u64) -> Result<(), ConfigError> {
    if (1..=300).contains(&secs) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "translation.timeout_secs",
        message: "Specify a value between 1 and 300 seconds".into(),
    })
}
