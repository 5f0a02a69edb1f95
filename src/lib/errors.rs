use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file {path} does not exist")]
    NotFound { path: PathBuf },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures reported by a translation backend.
///
/// These never escape a translation session; they are rendered into the
/// inline `[Translation Error: ...]` marker instead.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("no DeepL auth key configured")]
    MissingAuthKey,
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode backend response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned no translations")]
    EmptyResponse,
    #[error("{message}")]
    Backend { message: String },
}

/// I/O failures while reading or rewriting a source file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to replace {path} with rewritten content: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while loading the manifest of files to translate.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest file '{path}' not found")]
    NotFound { path: PathBuf },
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
