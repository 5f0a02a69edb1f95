//! Splits comment text into translatable prose and structural runs.

use crate::config::TranslationMode;
use crate::lib::script::han_end;
use crate::translator::TranslationSession;

/// Characters that separate translatable pieces and are always kept verbatim.
pub const STRUCTURAL_CHARS: &[char] = &[
    ',', ';', '(', ')', '[', ']', '{', '}', '"', '\'', '`', '<', '>', '@', '#', '$', '%', '^',
    '&', '*', '+', '=', '|', '\\', '~',
];

fn is_structural(c: char) -> bool {
    STRUCTURAL_CHARS.contains(&c)
}

/// Translate the Han pieces of `text`, keeping everything else byte for byte.
///
/// Pieces are delimited by [`STRUCTURAL_CHARS`]. Runs without Han text are
/// copied through unchanged. A Han piece is sent up to its last Han
/// character and rendered per `mode`; whatever follows is kept as is, so
/// text appended after an earlier translation is never sent again.
pub fn split_and_translate(
    text: &str,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut literal = String::new();
    let mut piece = String::new();

    for c in text.chars() {
        if is_structural(c) {
            flush_piece(&mut piece, &mut literal, &mut out, session, mode);
            literal.push(c);
        } else {
            piece.push(c);
        }
    }
    flush_piece(&mut piece, &mut literal, &mut out, session, mode);
    out.push_str(&literal);
    out
}

fn flush_piece(
    piece: &mut String,
    literal: &mut String,
    out: &mut String,
    session: &mut TranslationSession<'_>,
    mode: TranslationMode,
) {
    if piece.is_empty() {
        return;
    }
    if let Some(end) = han_end(piece) {
        out.push_str(literal);
        literal.clear();
        let (core, tail) = piece.split_at(end);
        let translated = session.translate(core);
        out.push_str(&format_translation(core, &translated, mode));
        literal.push_str(tail);
    } else {
        literal.push_str(piece);
    }
    piece.clear();
}

/// Render a translated piece: the translation alone, or `"<original> <translation>"`.
pub fn format_translation(original: &str, translated: &str, mode: TranslationMode) -> String {
    match mode {
        TranslationMode::Replace => translated.to_string(),
        TranslationMode::Append => format!("{original} {translated}"),
    }
}
