//! Comment location and rewriting.
//!
//! Locators find candidate comment regions in a [`Document`]; the block,
//! line and doc-block renderers turn regions containing Han text into
//! [`Edit`]s, which are layered onto a [`rewriter::LineBuffer`].
//!
//! Detection is pattern based. Comment markers inside string literals are
//! not recognised as such.

pub mod block;
pub mod doc;
pub mod line;
pub mod rewriter;
pub mod splitter;

pub use block::BlockCommentLocator;
pub use line::LineCommentLocator;
pub use rewriter::{EditConflict, LineBuffer};
pub use splitter::split_and_translate;

use crate::config::TranslationMode;
use crate::lib::script::has_target_script;
use crate::translator::TranslationSession;

/// Marker opening a line comment.
pub const LINE_MARKER: &str = "//";
/// Marker opening a documentation comment line.
pub const DOC_MARKER: &str = "///";

/// Source text together with its line view.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    lines: Vec<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text.lines().map(str::to_string).collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the text ends with a line break.
    pub fn has_trailing_newline(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// 0-based line holding byte `offset`.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.text.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }
}

/// Shape-specific data of a located comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentKind {
    /// `/* ... */`, possibly spanning several lines.
    Block {
        /// Leading whitespace before the opening marker.
        indent: String,
        /// Captured body between the marker runs, before decoration is removed.
        raw_body: String,
        /// Whitespace and closing marker run after the captured body.
        closing: String,
        /// Text following the closing marker on the last line.
        tail: String,
    },
    /// `code // comment`.
    Line {
        /// Everything before the first `//`.
        prefix: String,
    },
    /// Run of consecutive `///` lines.
    DocBlock {
        /// `(line_index, line)` for every line of the run.
        lines: Vec<(usize, String)>,
    },
}

impl CommentKind {
    pub const fn label(&self) -> &'static str {
        match self {
            CommentKind::Block { .. } => "multi-line",
            CommentKind::Line { .. } => "single-line",
            CommentKind::DocBlock { .. } => "doc",
        }
    }
}

/// A located comment spanning `start_line..=end_line` (0-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRegion {
    pub start_line: usize,
    pub end_line: usize,
    /// Matched source text.
    pub raw: String,
    /// Comment text checked for Han script: the cleaned block body, the text
    /// after `//`, or the doc lines with markup tags removed.
    pub body: String,
    pub kind: CommentKind,
}

impl CommentRegion {
    pub fn has_target_script(&self) -> bool {
        has_target_script(&self.body)
    }

    pub fn line_span(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Replacement of `start_line..=end_line` by `text` (which may hold line breaks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl Edit {
    pub fn line(index: usize, text: impl Into<String>) -> Self {
        Self {
            start_line: index,
            end_line: index,
            text: text.into(),
        }
    }
}

/// One translated fragment, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// 0-based line the fragment starts on.
    pub line: usize,
    pub original: String,
    pub translated: String,
}

/// Result of translating one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedRegion {
    pub edits: Vec<Edit>,
    pub translations: Vec<Translation>,
    pub lines_touched: usize,
}

/// Finds comment regions in a document.
pub trait CommentLocator {
    fn locate(&self, document: &Document) -> Vec<CommentRegion>;
}

/// Translate `region` and produce its edits.
///
/// Returns `None` when the region holds no Han text.
pub fn render_region(
    region: &CommentRegion,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) -> Option<RenderedRegion> {
    if !region.has_target_script() {
        return None;
    }
    match &region.kind {
        CommentKind::Block { .. } => block::render_block(region, session, mode),
        CommentKind::Line { .. } => line::render_line(region, session, mode),
        CommentKind::DocBlock { .. } => Some(doc::render_doc_block(region, session, mode)),
    }
}
