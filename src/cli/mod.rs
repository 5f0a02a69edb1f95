//! CLI command execution.
use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::{error, info};

use crate::config::{validate_extension, TranslatorConfig};
use crate::lib::fs::{discover_source_files, read_manifest, write_manifest};
use crate::pipeline::{run_batch, FileProcessor, FileReport, ProcessorSettings};
use crate::translator::DeepLBackend;

pub mod args;
pub mod profile;

pub use args::{
    CliArgs, CliCommand, DiscoverArgs, OutputFormat, TranslateArgs, DEFAULT_MANIFEST,
};
pub use profile::{resolve_auth_key, resolve_config_path, AuthKeySource, AUTH_KEY_ENV};

const BANNER_WIDTH: usize = 50;

/// Execute a parsed command, writing user-facing output to `out`.
pub fn execute(args: CliArgs, out: &mut dyn Write) -> Result<()> {
    let (config_path, config_source) = resolve_config_path(args.config_override)?;
    let config = TranslatorConfig::load(&config_path, config_source)?;

    match args.command {
        CliCommand::Translate(translate) => run_translate(&translate, config, out),
        CliCommand::Discover(discover) => run_discover(&discover, &config, &config_path, out),
    }
}

fn run_translate(
    args: &TranslateArgs,
    config: TranslatorConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let mut section = args.apply_overrides(config.translation);
    let (auth_key, key_source) =
        resolve_auth_key(args.auth_key_override.clone(), section.auth_key.take());
    let Some(auth_key) = auth_key else {
        bail!(
            "no DeepL auth key: pass --auth-key, set {AUTH_KEY_ENV} or add translation.auth_key to the config file"
        );
    };
    section.auth_key = Some(auth_key);
    info!(
        target: "comment_translator::translate",
        auth_key_source = key_source.as_str(),
        mode = section.mode.as_str(),
        write_output = section.write_output,
        "Translation settings resolved"
    );

    let backend =
        DeepLBackend::from_section(&section).context("failed to set up the DeepL client")?;
    let processor = FileProcessor::new(&backend, ProcessorSettings::from_section(&section));
    let paths = load_manifest(&args.manifest, out)?;

    let mut reports: Vec<FileReport> = Vec::new();
    let mut write_failure: Option<std::io::Error> = None;
    let summary = run_batch(&processor, &paths, |report| match args.format {
        OutputFormat::Text => {
            if write_failure.is_none() {
                if let Err(err) = write_text_report(out, report) {
                    write_failure = Some(err);
                }
            }
        }
        OutputFormat::Json => reports.push(report.clone()),
    });
    if let Some(err) = write_failure {
        return Err(err).context("failed to write report");
    }

    match args.format {
        OutputFormat::Text => writeln!(out, "{summary}")?,
        OutputFormat::Json => {
            let payload = json!({
                "mode": section.mode,
                "write_output": section.write_output,
                "files": reports,
                "summary": summary,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        }
    }
    Ok(())
}

/// Read the manifest; a missing or unreadable one yields an empty batch.
fn load_manifest(path: &Path, out: &mut dyn Write) -> Result<Vec<PathBuf>> {
    match read_manifest(path) {
        Ok(paths) => {
            info!(
                target: "comment_translator::translate",
                manifest = %path.display(),
                files = paths.len(),
                "Manifest loaded"
            );
            Ok(paths)
        }
        Err(err) => {
            error!(
                target: "comment_translator::translate",
                manifest = %path.display(),
                reason = %err,
                "Failed to load manifest"
            );
            writeln!(out, "Error reading file list: {err}")?;
            Ok(Vec::new())
        }
    }
}

fn write_text_report(out: &mut dyn Write, report: &FileReport) -> std::io::Result<()> {
    let path = report
        .path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(out, "=== translating {path} ===")?;
    writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(out, "{report}")?;
    writeln!(out)
}

fn run_discover(
    args: &DiscoverArgs,
    config: &TranslatorConfig,
    config_path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let rules = args.apply_overrides(config.discovery.clone());
    validate_extension(config_path, &rules.extension)?;

    let files = discover_source_files(&args.root, &rules)
        .with_context(|| format!("failed to search {}", args.root.display()))?;
    info!(
        target: "comment_translator::discover",
        root = %args.root.display(),
        extension = %rules.extension,
        matches = files.len(),
        "Discovery finished"
    );

    for file in &files {
        writeln!(out, "{}", file.display())?;
    }
    writeln!(
        out,
        "Total number of .{} files found: {}",
        rules.extension,
        files.len()
    )?;

    if let Some(output) = &args.output {
        write_manifest(output, &files)?;
        writeln!(out, "Manifest written to {}", output.display())?;
    }
    Ok(())
}
