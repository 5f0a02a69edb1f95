//! Line buffer receiving edits from successive locator passes.

use serde::Serialize;
use thiserror::Error;

use super::{Document, Edit};

/// An edit that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EditConflict {
    /// A line of the span was rewritten by an earlier pass.
    #[error("lines {start_line}-{end_line} overlap line {claimed_line} rewritten by an earlier pass")]
    Claimed {
        start_line: usize,
        end_line: usize,
        claimed_line: usize,
    },
    #[error("lines {start_line}-{end_line} fall outside a document of {line_count} lines")]
    OutOfRange {
        start_line: usize,
        end_line: usize,
        line_count: usize,
    },
}

/// Output lines keyed by original line index.
///
/// Every original line owns a slot holding zero or more output lines, so a
/// multi-line replacement may grow or shrink its span without shifting the
/// indices later edits refer to. Lines written during a pass become claimed
/// once the pass is committed; later passes cannot touch them.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    slots: Vec<Vec<String>>,
    claimed: Vec<bool>,
    written: Vec<bool>,
    trailing_newline: bool,
}

impl LineBuffer {
    pub fn new(document: &Document) -> Self {
        let count = document.lines().len();
        Self {
            slots: document.lines().iter().map(|l| vec![l.clone()]).collect(),
            claimed: vec![false; count],
            written: vec![false; count],
            trailing_newline: document.has_trailing_newline(),
        }
    }

    /// Ensure no line of `start_line..=end_line` was claimed by an earlier pass.
    pub fn check_span(&self, start_line: usize, end_line: usize) -> Result<(), EditConflict> {
        if start_line > end_line || end_line >= self.slots.len() {
            return Err(EditConflict::OutOfRange {
                start_line,
                end_line,
                line_count: self.slots.len(),
            });
        }
        match (start_line..=end_line).find(|&line| self.claimed[line]) {
            Some(claimed_line) => Err(EditConflict::Claimed {
                start_line,
                end_line,
                claimed_line,
            }),
            None => Ok(()),
        }
    }

    /// Overwrite the edit's span with its lines.
    ///
    /// Replacement line `k` lands on span line `k`. Lines beyond the span
    /// are emitted after its last line; span lines without a replacement
    /// line are dropped. A `\r` ending a replacement line is removed. Within a pass the last edit to a line wins.
    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditConflict> {
        self.check_span(edit.start_line, edit.end_line)?;

        let mut replacement = edit
            .text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string());
        for line in edit.start_line..=edit.end_line {
            self.slots[line] = replacement.next().into_iter().collect();
            self.written[line] = true;
        }
        self.slots[edit.end_line].extend(replacement);
        Ok(())
    }

    /// Claim every line written so far; subsequent passes must leave them alone.
    pub fn commit_pass(&mut self) {
        for (claimed, written) in self.claimed.iter_mut().zip(&self.written) {
            *claimed |= *written;
        }
    }

    /// Join the output lines with `\n`, keeping a trailing newline if the input had one.
    pub fn render(&self) -> String {
        let mut out = self
            .slots
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}
