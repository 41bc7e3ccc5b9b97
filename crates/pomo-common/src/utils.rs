//! Shared utility functions.

/// Known charset aliases and the canonical name each one maps to.
///
/// Lookup is case-insensitive; anything not listed passes through unchanged.
const CHARSET_ALIASES: &[(&str, &str)] = &[
    ("utf-8", "UTF-8"),
    ("utf8", "UTF-8"),
    ("iso-8859-1", "ISO-8859-1"),
    ("iso8859-1", "ISO-8859-1"),
];

/// Returns the canonical spelling of a charset name.
///
/// `utf8`, `UTF8` and `utf-8` all become `UTF-8`; unknown charsets are
/// returned as given.
pub fn canonical_charset(charset: &str) -> String {
    let trimmed = charset.trim();
    CHARSET_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| trimmed.to_string(), |(_, canonical)| (*canonical).to_string())
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
