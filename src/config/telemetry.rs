use tracing::{debug, info};

use super::{ConfigSource, TranslatorConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_source(path: &std::path::Path, source: ConfigSource) {
    match source {
        ConfigSource::Cli => debug!(
            target: "comment_translator::config",
            path = %path.display(),
            "Loading configuration named on the command line"
        ),
        ConfigSource::Env => info!(
            target: "comment_translator::config",
            path = %path.display(),
            "Loading configuration using COMMENT_TRANSLATOR_CONFIG environment variable"
        ),
        ConfigSource::Default => debug!(
            target: "comment_translator::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "COMMENT_TRANSLATOR_CONFIG not set; using default translator.toml"
        ),
    }
}

pub fn log_defaults(path: &std::path::Path) {
    debug!(
        target: "comment_translator::config",
        path = %path.display(),
        "No configuration file found; using built-in defaults"
    );
}

pub fn log_loaded(config: &TranslatorConfig) {
    info!(
        target: "comment_translator::config",
        path = %config
            .source_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".into()),
        endpoint = %config.translation.endpoint,
        source_lang = %config.translation.source_lang,
        target_lang = %config.translation.target_lang,
        mode = config.translation.mode.as_str(),
        write_output = config.translation.write_output,
        auth_key_configured = config.translation.auth_key.is_some(),
        extension = %config.discovery.extension,
        "Configuration loaded"
    );
}
