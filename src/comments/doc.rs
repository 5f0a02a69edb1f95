//! Documentation comment blocks (`///` runs with inline markup).
use std::sync::OnceLock;

use regex::Regex;

use crate::config::TranslationMode;
use crate::lib::script::{han_end, has_target_script};
use crate::translator::TranslationSession;

use super::{CommentKind, CommentRegion, Edit, RenderedRegion, Translation};

/// First `<tag>text</tag>` pair on a line.
fn tagged_text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<[^>]+>([^<]+)</[^>]+>").expect("tagged text pattern is valid")
    })
}

/// Text following the doc marker.
fn marker_text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"///\s*(.+)$").expect("doc marker pattern is valid"))
}

fn markup_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("markup tag pattern is valid"))
}

/// Strip markup tags from a doc line.
pub fn strip_markup(line: &str) -> String {
    markup_tag_pattern().replace_all(line, "").trim().to_string()
}

/// Translate each line of a doc block independently.
///
/// Text inside the first tag pair is preferred; otherwise the text after
/// `///` is used. Only the part up to the last Han character is translated,
/// so English appended by an earlier run stays as it is. Lines without Han
/// text produce no edit.
pub fn render_doc_block(
    region: &CommentRegion,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) -> RenderedRegion {
    let CommentKind::DocBlock { lines } = &region.kind else {
        return RenderedRegion::default();
    };

    let mut rendered = RenderedRegion::default();
    for (index, line) in lines {
        let Some((translation, rewritten)) = render_doc_line(*index, line, session, mode) else {
            continue;
        };
        rendered.edits.push(Edit::line(*index, rewritten));
        rendered.translations.push(translation);
        rendered.lines_touched += 1;
    }
    rendered
}

fn render_doc_line(
    index: usize,
    line: &str,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) -> Option<(Translation, String)> {
    let tagged = tagged_text_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .filter(|text| has_target_script(text.as_str()));

    if let Some(text) = tagged {
        let end = han_end(text.as_str())?;
        let original = text.as_str()[..end].trim_start();
        let translated = session.translate(original);
        let rewritten = match mode {
            TranslationMode::Replace => line.replace(original, &translated),
            TranslationMode::Append => format!("{line} {translated}"),
        };
        return Some((translation(index, original, translated), rewritten));
    }

    let caps = marker_text_pattern().captures(line)?;
    let marker = caps.get(0)?;
    let text = caps.get(1)?;
    let end = text.start() + han_end(text.as_str())?;
    let original = line[text.start()..end].trim();
    let translated = session.translate(original);
    let rewritten = match mode {
        TranslationMode::Replace => format!(
            "{}/// {translated}{}",
            &line[..marker.start()],
            &line[end..]
        ),
        TranslationMode::Append => format!("{line} {translated}"),
    };
    Some((translation(index, original, translated), rewritten))
}

fn translation(line: usize, original: &str, translated: String) -> Translation {
    Translation {
        line,
        original: original.to_string(),
        translated,
    }
}
