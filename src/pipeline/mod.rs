//! Per-file translation pipeline and batch driver.
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::comments::{
    render_region, BlockCommentLocator, CommentLocator, Document, LineBuffer, LineCommentLocator,
};
use crate::config::{TranslationMode, TranslationSection};
use crate::lib::{
    errors::FileError,
    fs::{read_source, write_source},
    telemetry::FileSpan,
};
use crate::translator::{TranslationBackend, TranslationSession};

pub mod report;

pub use report::{BatchSummary, FileReport, ReportEntry, ReportLine};

/// Settings that shape how one file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorSettings {
    pub mode: TranslationMode,
    pub source_lang: String,
    pub target_lang: String,
    pub write_output: bool,
}

impl ProcessorSettings {
    pub fn from_section(section: &TranslationSection) -> Self {
        Self {
            mode: section.mode,
            source_lang: section.source_lang.clone(),
            target_lang: section.target_lang.clone(),
            write_output: section.write_output,
        }
    }
}

/// Runs the block pass then the line pass over a file.
pub struct FileProcessor<'a> {
    backend: &'a dyn TranslationBackend,
    settings: ProcessorSettings,
}

impl<'a> FileProcessor<'a> {
    pub fn new(backend: &'a dyn TranslationBackend, settings: ProcessorSettings) -> Self {
        Self { backend, settings }
    }

    /// Translate every Han comment in `text`.
    ///
    /// Block comments are rewritten first; the line pass skips any region
    /// touching a line the block pass rewrote and records the conflict.
    pub fn process_text(&self, text: &str) -> (String, FileReport) {
        let document = Document::new(text);
        let mut buffer = LineBuffer::new(&document);
        let mut session = TranslationSession::new(
            self.backend,
            &self.settings.source_lang,
            &self.settings.target_lang,
        );
        let mut report = FileReport::new(self.settings.mode);

        let passes: [&dyn CommentLocator; 2] = [&BlockCommentLocator, &LineCommentLocator];
        for locator in passes {
            for region in locator.locate(&document) {
                if !region.has_target_script() {
                    continue;
                }
                if let Err(conflict) = buffer.check_span(region.start_line, region.end_line) {
                    warn!(
                        target: "comment_translator::pipeline",
                        kind = region.kind.label(),
                        reason = %conflict,
                        "Skipping comment already rewritten"
                    );
                    report.conflicts.push(conflict);
                    continue;
                }
                let Some(rendered) = render_region(&region, &mut session, self.settings.mode)
                else {
                    continue;
                };
                for edit in &rendered.edits {
                    if let Err(conflict) = buffer.apply(edit) {
                        warn!(
                            target: "comment_translator::pipeline",
                            kind = region.kind.label(),
                            reason = %conflict,
                            "Dropping edit"
                        );
                        report.conflicts.push(conflict);
                    }
                }
                report.record(&region, &rendered);
            }
            buffer.commit_pass();
        }

        report.characters_translated = session.characters_translated();
        debug!(
            target: "comment_translator::pipeline",
            comments = report.total_comments(),
            cached_fragments = session.cached_fragments(),
            "Processed text"
        );
        (buffer.render(), report)
    }

    /// Read, translate and (when enabled and changed) rewrite `path`.
    pub fn process_file(&self, path: &Path) -> Result<FileReport, FileError> {
        let file_span = FileSpan::start(path);
        let outcome = {
            let _entered = file_span.span().enter();
            self.process_file_inner(path)
        };
        match &outcome {
            Ok(report) => file_span.finish(
                "ok",
                report.total_comments(),
                report.characters_translated,
            ),
            Err(_) => file_span.finish("error", 0, 0),
        }
        outcome
    }

    fn process_file_inner(&self, path: &Path) -> Result<FileReport, FileError> {
        let original = read_source(path)?;
        let (rewritten, mut report) = self.process_text(&original);
        report.path = Some(path.to_path_buf());

        if self.settings.write_output && rewritten != original {
            write_source(path, &rewritten)?;
            report.written = true;
            info!(
                target: "comment_translator::pipeline",
                path = %path.display(),
                "Translated file saved"
            );
        }
        Ok(report)
    }
}

/// Process every path in order; a failing file is logged and skipped.
///
/// `on_report` sees each successful report as soon as it is produced.
pub fn run_batch<F>(
    processor: &FileProcessor<'_>,
    paths: &[PathBuf],
    mut on_report: F,
) -> BatchSummary
where
    F: FnMut(&FileReport),
{
    let mut summary = BatchSummary::default();
    for path in paths {
        match processor.process_file(path) {
            Ok(report) => {
                on_report(&report);
                summary.add(&report);
            }
            Err(err) => {
                error!(
                    target: "comment_translator::pipeline",
                    path = %path.display(),
                    reason = %err,
                    "Failed to process file"
                );
                summary.add_failure();
            }
        }
    }
    summary
}
