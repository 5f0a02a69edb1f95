//! `/* ... */` comments.
use std::sync::OnceLock;

use regex::Regex;

use crate::config::TranslationMode;
use crate::lib::script::han_end;
use crate::translator::TranslationSession;

use super::{
    split_and_translate, CommentKind, CommentLocator, CommentRegion, Document, Edit,
    RenderedRegion, Translation,
};

/// Opening marker run at the start of a line, lazily matched body, closing marker run.
fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?ms)^([ \t]*)/\*+\s*(.*?)\s*\*+/").expect("block comment pattern is valid")
    })
}

fn edge_decoration() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\A\s*\**\s*|\s*\**\s*\z").expect("edge decoration pattern is valid")
    })
}

fn continuation_decoration() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\n\s*\*+\s*").expect("continuation decoration pattern is valid")
    })
}

/// Leading whitespace and `*` gutter of a comment line.
fn gutter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\A[ \t]*\**[ \t]*").expect("gutter pattern is valid"))
}

/// Remove leading/trailing asterisk runs and the `*` gutter of continuation lines.
///
/// CRLF line breaks are normalised to `\n` first.
pub fn clean_block_body(raw_body: &str) -> String {
    let raw_body = raw_body.replace("\r\n", "\n");
    let trimmed = edge_decoration().replace_all(&raw_body, "");
    continuation_decoration()
        .replace_all(&trimmed, "\n")
        .into_owned()
}

/// Locates block comments anywhere in the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockCommentLocator;

impl CommentLocator for BlockCommentLocator {
    fn locate(&self, document: &Document) -> Vec<CommentRegion> {
        let text = document.text();
        block_pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let indent = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2)?;
                let raw_body = body.as_str();
                let line_end = text[full.end()..]
                    .find('\n')
                    .map_or(text.len(), |pos| full.end() + pos);
                let tail = text[full.end()..line_end].trim_end_matches('\r');

                Some(CommentRegion {
                    start_line: document.line_of_offset(full.start()),
                    end_line: document.line_of_offset(full.end()),
                    raw: full.as_str().to_string(),
                    body: clean_block_body(raw_body),
                    kind: CommentKind::Block {
                        indent: indent.to_string(),
                        raw_body: raw_body.to_string(),
                        closing: text[body.end()..full.end()].to_string(),
                        tail: tail.to_string(),
                    },
                })
            })
            .collect()
    }
}

/// Translate a block comment and rebuild its lines.
///
/// In Replace mode the translated body replaces every occurrence of the
/// cleaned body inside the match; decorated multi-line bodies, whose cleaned
/// form does not occur literally, have the whole captured body replaced
/// instead. In Append mode every original line is kept and the translation
/// of the body up to its last Han character is inserted before the closing
/// marker. Markers, indentation and code
/// after the closing marker are kept in both modes.
pub fn render_block(
    region: &CommentRegion,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) -> Option<RenderedRegion> {
    let CommentKind::Block {
        indent,
        raw_body,
        closing,
        tail,
    } = &region.kind
    else {
        return None;
    };

    let source = match mode {
        TranslationMode::Replace => region.body.as_str(),
        TranslationMode::Append => han_end(&region.body).map_or("", |end| &region.body[..end]),
    };
    let translated = split_and_translate(source, session, TranslationMode::Replace);
    let rebuilt = match mode {
        TranslationMode::Replace => {
            let comment_part = &region.raw[indent.len()..];
            let substituted = if comment_part.contains(region.body.as_str()) {
                comment_part.replace(region.body.as_str(), &translated)
            } else {
                comment_part.replace(raw_body.as_str(), &translated)
            };
            format!("{indent}{substituted}")
        }
        TranslationMode::Append => {
            let head = &region.raw[..region.raw.len() - closing.len()];
            format!("{head}{}{closing}", appended_text(head, indent, closing, &translated))
        }
    };

    Some(RenderedRegion {
        edits: vec![Edit {
            start_line: region.start_line,
            end_line: region.end_line,
            text: format!("{rebuilt}{tail}"),
        }],
        translations: vec![Translation {
            line: region.start_line,
            original: region.body.trim().to_string(),
            translated,
        }],
        lines_touched: region.line_span(),
    })
}

/// Text inserted between the original body and the closing marker.
///
/// A one-line translation before a closing marker on the same line is
/// separated by a space. Otherwise each translated line goes on its own
/// line, behind the gutter of the body's last line.
fn appended_text(head: &str, indent: &str, closing: &str, translated: &str) -> String {
    if !closing.contains('\n') && !translated.contains('\n') {
        return format!(" {translated}");
    }
    let gutter = match head.rsplit_once('\n') {
        Some((_, last)) => gutter_pattern()
            .find(last.trim_end_matches('\r'))
            .map_or("", |m| m.as_str())
            .to_string(),
        None => format!("{indent} * "),
    };
    translated
        .lines()
        .map(|line| format!("\n{}", format!("{gutter}{line}").trim_end()))
        .collect()
}
