//! CLI argument definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{DiscoverySection, TranslationMode, TranslationSection};

/// Default manifest read by `translate`.
pub const DEFAULT_MANIFEST: &str = "cs_file_path.txt";

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Translate Han-script source comments through DeepL",
    long_about = None
)]
pub struct CliArgs {
    /// Path to translator.toml (overrides COMMENT_TRANSLATOR_CONFIG).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Translate the comments of every file listed in a manifest.
    Translate(TranslateArgs),
    /// List source files under a directory, optionally writing a manifest.
    #[command(
        after_help = "Hint: use `comment-translator discover <ROOT> --output cs_file_path.txt` to produce the manifest `translate` reads by default."
    )]
    Discover(DiscoverArgs),
}

/// Report format for `translate`.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for `translate`.
#[derive(Debug, Clone, Args)]
pub struct TranslateArgs {
    /// Manifest listing one source path per line.
    #[arg(default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,
    /// DeepL auth key (overrides DEEPL_AUTH_KEY and the config file).
    #[arg(long = "auth-key")]
    pub auth_key_override: Option<String>,
    /// Substitute translations for the original text and rewrite files.
    #[arg(long, conflicts_with = "append")]
    pub replace: bool,
    /// Keep the original text and add translations after it; files are not rewritten.
    #[arg(long)]
    pub append: bool,
    /// Report translations without rewriting any file.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl TranslateArgs {
    /// Apply mode and dry-run flags on top of the configured section.
    ///
    /// A mode flag also resets writing to that mode's default.
    pub fn apply_overrides(&self, mut section: TranslationSection) -> TranslationSection {
        let mode = if self.replace {
            Some(TranslationMode::Replace)
        } else if self.append {
            Some(TranslationMode::Append)
        } else {
            None
        };
        if let Some(mode) = mode {
            section.mode = mode;
            section.write_output = mode == TranslationMode::Replace;
        }
        if self.dry_run {
            section.write_output = false;
        }
        section
    }
}

/// Arguments for `discover`.
#[derive(Debug, Clone, Args)]
pub struct DiscoverArgs {
    /// Directory to search.
    pub root: PathBuf,
    /// File extension to match, without the dot.
    #[arg(long)]
    pub extension: Option<String>,
    /// Skip files whose name ends with this suffix.
    #[arg(long)]
    pub exclude_suffix: Option<String>,
    /// Skip paths containing a directory with this name (repeatable).
    #[arg(long = "skip-dir")]
    pub skip_dirs: Vec<String>,
    /// Write the matches to this manifest file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl DiscoverArgs {
    /// Apply CLI rules on top of the configured discovery section.
    pub fn apply_overrides(&self, mut rules: DiscoverySection) -> DiscoverySection {
        if let Some(extension) = &self.extension {
            rules.extension = extension.clone();
        }
        if let Some(suffix) = &self.exclude_suffix {
            rules.exclude_suffix = suffix.clone();
        }
        if !self.skip_dirs.is_empty() {
            rules.skip_dirs = self.skip_dirs.clone();
        }
        rules
    }
}
