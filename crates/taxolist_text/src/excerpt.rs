//! Word counting and excerpt truncation.

/// Marker appended to a truncated excerpt.
pub const ELLIPSIS: &str = "\u{2026}";

/// Counts whitespace separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncates `text` to its first `max_words` words.
///
/// A word is a maximal run of non-whitespace characters. Text that already
/// fits is returned unmodified, including its original spacing. Truncated
/// text has its words joined by single spaces and ends with [`ELLIPSIS`].
/// A limit of zero always yields an empty string.
pub fn trim_words(text: &str, max_words: usize) -> String {
    if max_words == 0 {
        return String::new();
    }

    let mut words = text.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(max_words).collect();

    if words.next().is_none() {
        return text.to_string();
    }

    let mut out = kept.join(" ");
    out.push_str(ELLIPSIS);
    out
}
