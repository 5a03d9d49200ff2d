//! Loading of JSON/JSONC input documents

use std::path::Path;

use jsonc_parser::ParseOptions;
use miette::{Result, miette};
use serde_json::{Map, Value};
use tracing::debug;

use taxolist_config::settings_from_value;
use taxolist_core::{ImageSizes, Term};

/// Reads a JSON document, allowing comments and trailing commas.
///
/// An empty document reads as `null`.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;

    let value = jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| miette!("Failed to parse {}: {}", path.display(), e))?
        .unwrap_or(Value::Null);

    debug!("Loaded {}", path.display());
    Ok(value)
}

/// Reads a raw settings mapping.
pub fn read_settings(path: &Path) -> Result<Map<String, Value>> {
    settings_from_value(read_document(path)?)
        .map_err(|e| miette!("Invalid settings in {}: {}", path.display(), e))
}

/// Reads an array of term records.
pub fn read_terms(path: &Path) -> Result<Vec<Term>> {
    match read_document(path)? {
        Value::Null => Ok(Vec::new()),
        value => serde_json::from_value(value)
            .map_err(|e| miette!("Invalid terms in {}: {}", path.display(), e)),
    }
}

/// Reads an image size table.
pub fn read_sizes(path: &Path) -> Result<ImageSizes> {
    match read_document(path)? {
        Value::Null => Ok(ImageSizes::new()),
        value => serde_json::from_value(value)
            .map_err(|e| miette!("Invalid image sizes in {}: {}", path.display(), e)),
    }
}
