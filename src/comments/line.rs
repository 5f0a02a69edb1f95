//! `//` line comments and `///` documentation runs.

use crate::config::TranslationMode;
use crate::translator::TranslationSession;

use super::{
    doc::strip_markup, split_and_translate, CommentKind, CommentLocator, CommentRegion, Document,
    Edit, RenderedRegion, Translation, DOC_MARKER, LINE_MARKER,
};

/// Single pass over the lines emitting line comments and doc blocks in order.
///
/// A line whose trimmed text starts with `///` joins the open doc block; a
/// block closes at the first line that does not. Any other line holding
/// `//` followed by text is a line comment split at the first marker.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineCommentLocator;

impl CommentLocator for LineCommentLocator {
    fn locate(&self, document: &Document) -> Vec<CommentRegion> {
        let lines = document.lines();
        let mut regions = Vec::new();
        let mut doc_lines: Vec<(usize, String)> = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            if is_doc_line(line) {
                doc_lines.push((index, line.clone()));
                let continues = lines.get(index + 1).is_some_and(|next| is_doc_line(next));
                if !continues {
                    regions.push(doc_block_region(std::mem::take(&mut doc_lines)));
                }
                continue;
            }

            let Some((prefix, body)) = line.split_once(LINE_MARKER) else {
                continue;
            };
            if body.is_empty() {
                continue;
            }
            regions.push(CommentRegion {
                start_line: index,
                end_line: index,
                raw: line.clone(),
                body: body.to_string(),
                kind: CommentKind::Line {
                    prefix: prefix.to_string(),
                },
            });
        }

        regions
    }
}

fn is_doc_line(line: &str) -> bool {
    line.trim_start().starts_with(DOC_MARKER)
}

fn doc_block_region(lines: Vec<(usize, String)>) -> CommentRegion {
    let start_line = lines.first().map_or(0, |(index, _)| *index);
    let end_line = lines.last().map_or(start_line, |(index, _)| *index);
    let raw = lines
        .iter()
        .map(|(_, line)| line.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let body = lines
        .iter()
        .map(|(_, line)| strip_markup(line))
        .collect::<Vec<_>>()
        .join("\n");

    CommentRegion {
        start_line,
        end_line,
        raw,
        body,
        kind: CommentKind::DocBlock { lines },
    }
}

/// Translate a line comment: `prefix + "//" + translated body`.
///
/// In Append mode the splitter output already carries the original text
/// before each translation.
pub fn render_line(
    region: &CommentRegion,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) -> Option<RenderedRegion> {
    let CommentKind::Line { prefix } = &region.kind else {
        return None;
    };

    let translated = split_and_translate(&region.body, session, mode);
    Some(RenderedRegion {
        edits: vec![Edit::line(
            region.start_line,
            format!("{prefix}{LINE_MARKER}{translated}"),
        )],
        translations: vec![Translation {
            line: region.start_line,
            original: region.body.trim().to_string(),
            translated,
        }],
        lines_touched: 1,
    })
}
