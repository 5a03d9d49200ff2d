//! # taxolist_config
//!
//! Settings resolution for term list instances.
//!
//! This crate provides:
//! - The typed [`Configuration`] and its defaults table
//! - [`ConfigurationResolver`] for first resolution and updates
//! - The [`StylesheetUsage`] collaborator tracking default stylesheet users
//! - Option lists for settings forms
//!
//! Resolution never fails: unusable values are normalized, not rejected.
//!
//! ## Example
//!
//! ```rust
//! use taxolist_config::{ConfigurationResolver, parse_settings};
//!
//! let raw = parse_settings(r#"{ "showCount": 1, "listStyle": "ol" }"#)?;
//! let config = ConfigurationResolver::new().resolve(&raw);
//! assert!(config.show_count);
//! # Ok::<(), taxolist_config::ConfigError>(())
//! ```

mod choices;
mod configuration;
mod error;
mod options;
mod resolver;
mod stylesheet;
pub mod value;

use serde_json::{Map, Value};

pub use choices::{allowed_taxonomies, sample_excerpt};
pub use configuration::{Configuration, keys};
pub use error::ConfigError;
pub use options::{ListStyle, OrderBy, SortOrder};
pub use resolver::ConfigurationResolver;
pub use stylesheet::{InMemoryStylesheetUsage, StylesheetChange, StylesheetUsage, sync_stylesheet};

/// Parses a settings document into a raw mapping.
pub fn parse_settings(json: &str) -> Result<Map<String, Value>, ConfigError> {
    settings_from_value(serde_json::from_str(json)?)
}

/// Extracts the raw mapping from an already parsed settings document.
///
/// `null` is treated as an empty mapping.
pub fn settings_from_value(value: Value) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        Value::Bool(_) => Err(ConfigError::NotAnObject("a boolean")),
        Value::Number(_) => Err(ConfigError::NotAnObject("a number")),
        Value::String(_) => Err(ConfigError::NotAnObject("a string")),
        Value::Array(_) => Err(ConfigError::NotAnObject("an array")),
    }
}
