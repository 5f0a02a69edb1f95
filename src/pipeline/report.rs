//! Per-file and batch reports.
use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::comments::{CommentKind, CommentRegion, EditConflict, RenderedRegion};
use crate::config::TranslationMode;

const WIDE_RULE: usize = 80;
const RULE: usize = 50;
const SHORT_RULE: usize = 30;

/// One translated fragment; line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub line: usize,
    pub original: String,
    pub translated: String,
}

/// A comment that contained Han text; line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub kind: &'static str,
    pub start_line: usize,
    pub end_line: usize,
    pub translations: Vec<ReportLine>,
}

/// Counters and findings for one processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: Option<PathBuf>,
    pub mode: TranslationMode,
    pub multiline_count: usize,
    pub singleline_count: usize,
    pub doc_block_count: usize,
    pub lines_touched: usize,
    pub characters_translated: usize,
    pub entries: Vec<ReportEntry>,
    pub conflicts: Vec<EditConflict>,
    pub written: bool,
}

impl FileReport {
    pub fn new(mode: TranslationMode) -> Self {
        Self {
            path: None,
            mode,
            multiline_count: 0,
            singleline_count: 0,
            doc_block_count: 0,
            lines_touched: 0,
            characters_translated: 0,
            entries: Vec::new(),
            conflicts: Vec::new(),
            written: false,
        }
    }

    pub fn total_comments(&self) -> usize {
        self.multiline_count + self.singleline_count + self.doc_block_count
    }

    /// Count a translated region and keep its translations for display.
    pub fn record(&mut self, region: &CommentRegion, rendered: &RenderedRegion) {
        match region.kind {
            CommentKind::Block { .. } => self.multiline_count += 1,
            CommentKind::Line { .. } => self.singleline_count += 1,
            CommentKind::DocBlock { .. } => self.doc_block_count += 1,
        }
        self.lines_touched += rendered.lines_touched;
        self.entries.push(ReportEntry {
            kind: region.kind.label(),
            start_line: region.start_line + 1,
            end_line: region.end_line + 1,
            translations: rendered
                .translations
                .iter()
                .map(|t| ReportLine {
                    line: t.line + 1,
                    original: t.original.clone(),
                    translated: t.translated.clone(),
                })
                .collect(),
        });
    }

    fn entries_of<'a>(&'a self, kinds: &'a [&str]) -> impl Iterator<Item = &'a ReportEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| kinds.contains(&entry.kind))
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.as_deref().map(Path::display);
        if let Some(path) = &path {
            writeln!(f, "\nAnalyzing and translating file: {path}")?;
            writeln!(f, "{}", "=".repeat(WIDE_RULE))?;
        }

        writeln!(f, "\nMulti-line comments containing Chinese:")?;
        writeln!(f, "{}", "-".repeat(RULE))?;
        for entry in self.entries_of(&["multi-line"]) {
            writeln!(f, "Lines {:4}-{:4}:", entry.start_line, entry.end_line)?;
            for line in &entry.translations {
                writeln!(f, "Original: {}", line.original)?;
                writeln!(f, "Translated: {}", line.translated)?;
            }
            writeln!(f, "{}", "-".repeat(SHORT_RULE))?;
        }

        writeln!(f, "\nSingle-line and doc comments containing Chinese:")?;
        writeln!(f, "{}", "-".repeat(RULE))?;
        for entry in self.entries_of(&["single-line", "doc"]) {
            if entry.kind == "doc" {
                writeln!(f, "Doc Lines {:4}-{:4}:", entry.start_line, entry.end_line)?;
            }
            for line in &entry.translations {
                writeln!(f, "Line {:4}: {}", line.line, line.translated)?;
            }
        }

        for conflict in &self.conflicts {
            writeln!(f, "Skipped: {conflict}")?;
        }
        if self.written {
            if let Some(path) = &path {
                writeln!(f, "\nTranslated file saved to: {path}")?;
            }
        }

        writeln!(f, "\n{}", "=".repeat(RULE))?;
        writeln!(f, "TRANSLATION SUMMARY")?;
        writeln!(f, "{}", "=".repeat(RULE))?;
        writeln!(
            f,
            "Multi-line comments containing Chinese: {}",
            self.multiline_count
        )?;
        writeln!(
            f,
            "Single-line comments containing Chinese: {}",
            self.singleline_count
        )?;
        writeln!(
            f,
            "Documentation comments containing Chinese: {}",
            self.doc_block_count
        )?;
        writeln!(
            f,
            "Total characters translated: {}",
            self.characters_translated
        )?;
        writeln!(f, "{}", "-".repeat(RULE))?;
        writeln!(
            f,
            "Total comments containing Chinese: {}",
            self.total_comments()
        )?;
        writeln!(
            f,
            "Total lines containing Chinese comments: {}",
            self.lines_touched
        )?;
        writeln!(f, "Translation mode: {}", self.mode.as_str())?;
        write!(f, "{}", "=".repeat(RULE))
    }
}

/// Totals over a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub files_written: usize,
    pub comments: usize,
    pub lines_touched: usize,
    pub characters_translated: usize,
    pub conflicts: usize,
}

impl BatchSummary {
    pub fn add(&mut self, report: &FileReport) {
        self.files_processed += 1;
        self.files_written += usize::from(report.written);
        self.comments += report.total_comments();
        self.lines_touched += report.lines_touched;
        self.characters_translated += report.characters_translated;
        self.conflicts += report.conflicts.len();
    }

    pub fn add_failure(&mut self) {
        self.files_failed += 1;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE))?;
        writeln!(f, "BATCH SUMMARY")?;
        writeln!(f, "{}", "=".repeat(RULE))?;
        writeln!(f, "Files processed: {}", self.files_processed)?;
        writeln!(f, "Files failed: {}", self.files_failed)?;
        writeln!(f, "Files rewritten: {}", self.files_written)?;
        writeln!(f, "Comments translated: {}", self.comments)?;
        writeln!(f, "Lines touched: {}", self.lines_touched)?;
        writeln!(f, "Characters translated: {}", self.characters_translated)?;
        write!(f, "Overlapping edits skipped: {}", self.conflicts)
    }
}
