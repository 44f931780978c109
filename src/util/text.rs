//! Character-based text fitting for single-line display.

/// Truncates `s` to at most `max_len` characters, ending in `...` when cut.
///
/// Counts `char`s rather than bytes so multi-byte error messages never split
/// inside a code point.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pads `s` with spaces on the right to `width` characters.
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}
