//! Character-offset helpers.
//!
//! Break offsets count Unicode scalar values, never bytes, so every slice of
//! text content goes through these.

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `offset`, clamped to the end of `text`.
pub fn byte_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// The text from character `offset` to the end.
pub fn slice_from(text: &str, offset: usize) -> &str {
    &text[byte_offset(text, offset)..]
}

/// The text before character `offset`.
pub fn slice_to(text: &str, offset: usize) -> &str {
    &text[..byte_offset(text, offset)]
}

/// True for empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Matches the `\w` class: letters, digits and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
