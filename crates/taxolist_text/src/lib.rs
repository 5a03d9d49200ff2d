//! # taxolist_text
//!
//! Text helpers used while building term list markup:
//! - Word-based excerpt truncation
//! - HTML escaping for text, attributes and URLs
//! - Sanitizers for class names, keys and single-line text fields

mod excerpt;
mod html;
mod sanitize;

pub use excerpt::{ELLIPSIS, trim_words, word_count};
pub use html::{escape_html, escape_url};
pub use sanitize::{
    sanitize_html_class, sanitize_key, sanitize_select_options, sanitize_text_field,
};
