//! Han script detection.

/// Returns true if `c` is a CJK ideograph (unified, extensions, or compatibility).
pub fn is_han(c: char) -> bool {
    matches!(c,
      '\u{3400}'..='\u{4DBF}' // CJK Unified Ideographs Extension A
      | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
      | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
      | '\u{20000}'..='\u{2EBEF}' // Extensions B-F
    )
}

/// True iff any character of `text` is in the target script.
pub fn has_target_script(text: &str) -> bool {
    text.chars().any(is_han)
}

/// Byte offset just past the last Han character of `text`.
///
/// Text after that offset is never sent for translation.
pub fn han_end(text: &str) -> Option<usize> {
    text.char_indices()
        .rev()
        .find(|(_, c)| is_han(*c))
        .map(|(index, c)| index + c.len_utf8())
}
