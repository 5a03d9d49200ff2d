//! Escaping for HTML content, attributes and URLs.

/// URL schemes allowed to survive [`escape_url`].
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "mailto", "tel"];

/// Escapes text for use inside HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

/// Cleans a URL for an `href`/`src` attribute.
///
/// Whitespace and characters that never belong in a URL are dropped, and a
/// URL with a scheme outside the allow-list (e.g. `javascript:`) becomes the
/// empty string. The result is attribute-escaped.
pub fn escape_url(url: &str) -> String {
    let cleaned: String = url.trim().chars().filter(|c| is_url_char(*c)).collect();

    if let Some(scheme) = scheme_of(&cleaned) {
        let scheme = scheme.to_ascii_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return String::new();
        }
    }

    escape_html(&cleaned)
}

fn is_url_char(c: char) -> bool {
    !c.is_ascii() && !c.is_whitespace()
        || c.is_ascii_alphanumeric()
        || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
}

/// Returns the scheme when the URL starts with `scheme:`.
fn scheme_of(url: &str) -> Option<&str> {
    let end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'))?;
    if url[end..].starts_with(':') && end > 0 {
        Some(&url[..end])
    } else {
        None
    }
}
