//! Small text helpers shared by the section templates.

/// Shortens `text` to at most `max` characters, appending `suffix` when it
/// was cut. Trailing whitespace before the suffix is dropped.
pub fn truncate(text: &str, max: usize, suffix: &str) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{suffix}", text[..cut].trim_end()),
    }
}

/// `1 pesquisador` / `3 pesquisadores`.
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
