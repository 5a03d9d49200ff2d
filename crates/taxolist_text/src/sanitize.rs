//! Sanitizers for values that end up in markup or persisted settings.

use crate::escape_html;

/// Reduces a class name to `[A-Za-z0-9_-]`.
///
/// Percent-encoded octets are removed as a whole before filtering, so
/// `a%20b` becomes `ab` rather than `a20b`.
pub fn sanitize_html_class(class: &str) -> String {
    let bytes = class.as_bytes();
    let mut out = String::with_capacity(class.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
        {
            i += 3;
            continue;
        }
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            out.push(b as char);
        }
        i += 1;
    }

    out
}

/// Lowercases a key and reduces it to `[a-z0-9_-]`.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Cleans user input meant to be a single line of plain text.
///
/// Tags are stripped, every whitespace run (line breaks and tabs included)
/// becomes one space, and the result is trimmed. The output is a fixpoint:
/// sanitizing it again returns it unchanged.
pub fn sanitize_text_field(text: &str) -> String {
    let mut stripped = strip_tags(text);
    // Removing a tag can join a kept `<` to a letter and form a new tag.
    loop {
        let next = strip_tags(&stripped);
        if next == stripped {
            break;
        }
        stripped = next;
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes `<tag ...>` sequences. A tag that never closes swallows the rest
/// of the input; a `<` that cannot start a tag is kept.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<'
            && chars
                .peek()
                .is_some_and(|n| n.is_ascii_alphabetic() || matches!(n, '/' | '!' | '?'))
        {
            for inner in chars.by_ref() {
                if inner == '>' {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    out
}

/// Cleans `(key, label)` pairs used as selectable options.
///
/// Labels are HTML-escaped and keys key-sanitized. When two entries share a
/// label the later key wins. The result is sorted by label.
pub fn sanitize_select_options<I, K, V>(options: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut cleaned: Vec<(String, String)> = Vec::new();

    for (key, label) in options {
        let label = escape_html(label.as_ref());
        let key = sanitize_key(key.as_ref());
        match cleaned.iter_mut().find(|(_, l)| *l == label) {
            Some(existing) => existing.0 = key,
            None => cleaned.push((key, label)),
        }
    }

    cleaned.sort_by(|a, b| a.1.cmp(&b.1));
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain("taxolist-item", "taxolist-item")]
    #[case::spaces("two words", "twowords")]
    #[case::percent("a%20b", "ab")]
    #[case::dangling_percent("a%2", "a2")]
    #[case::quotes("x\" onclick=\"y", "xonclicky")]
    #[case::unicode("caf\u{e9}", "caf")]
    #[case::underscore("size-post_thumb", "size-post_thumb")]
    fn test_sanitize_html_class(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_html_class(input), expected);
    }

    #[rstest]
    #[case::upper("OL", "ol")]
    #[case::symbols("u l!", "ul")]
    #[case::mixed("Medium_Large-2", "medium_large-2")]
    fn test_sanitize_key(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_key(input), expected);
    }

    #[rstest]
    #[case::tags("<b>Top</b> Categories", "Top Categories")]
    #[case::whitespace("  a\n\tb   c ", "a b c")]
    #[case::lone_lt("1 < 2", "1 < 2")]
    #[case::unclosed("safe <script", "safe")]
    #[case::empty("", "")]
    #[case::nested_open("<<b>x", "")]
    #[case::nested_after_text("a <<i>b> c", "a c")]
    #[case::lt_before_space("x < <b>y</b>", "x < y")]
    fn test_sanitize_text_field(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_text_field(input), expected);
    }

    #[rstest]
    #[case("<<b>x")]
    #[case("<<i>medium")]
    #[case("<<<b>b>i>z")]
    #[case("1 < 2 <b>and</b> <3")]
    #[case("  <\n<p>p>  ")]
    fn test_sanitize_text_field_is_stable(#[case] input: &str) {
        let once = sanitize_text_field(input);
        assert_eq!(sanitize_text_field(&once), once);
    }

    #[test]
    fn test_sanitize_select_options() {
        let options = vec![
            ("Thumbnail", "thumbnail"),
            ("large", "large"),
            ("dup-a", "Same"),
            ("dup-b", "Same"),
            ("x", "<b>"),
        ];

        let cleaned = sanitize_select_options(options);
        assert_eq!(
            cleaned,
            vec![
                ("x".to_string(), "&lt;b&gt;".to_string()),
                ("dup-b".to_string(), "Same".to_string()),
                ("large".to_string(), "large".to_string()),
                ("thumbnail".to_string(), "thumbnail".to_string()),
            ]
        );
    }
}
