//! Image sizes and thumbnail lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use taxolist_config::Configuration;
use taxolist_hooks::{ExtensionRegistry, FilterPoint, HookArgs};
use taxolist_text::sanitize_select_options;

use crate::Term;

/// A named image size registered with the host's media subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub crop: bool,
}

impl ImageSize {
    pub fn new(name: impl Into<String>, width: u32, height: u32, crop: bool) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            crop,
        }
    }
}

/// The host's image size registry.
///
/// Deserializes from an object keyed by size name:
///
/// ```json
/// { "thumbnail": { "width": 150, "height": 150, "crop": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSizes {
    sizes: BTreeMap<String, ImageSize>,
}

impl ImageSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, size: ImageSize) {
        self.sizes.insert(size.name.clone(), size);
    }

    pub fn get(&self, name: &str) -> Option<&ImageSize> {
        self.sizes.get(name)
    }

    /// Registered size names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sizes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Size names that may be selected, after the `allowedImageSizes` filter.
    ///
    /// The filter sees a `{name: label}` table; its result is sanitized and
    /// sorted by label.
    pub fn allowed(&self, registry: &ExtensionRegistry) -> Vec<String> {
        let table: BTreeMap<String, String> = self
            .names()
            .map(|name| (name.to_string(), name.to_string()))
            .collect();
        let table = registry.invoke_as(FilterPoint::AllowedImageSizes, table, &HookArgs::new());

        sanitize_select_options(table)
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    /// Allowed sizes that also exist in the registry, sorted by name.
    pub fn allowed_sizes(&self, registry: &ExtensionRegistry) -> Vec<&ImageSize> {
        let mut sizes: Vec<&ImageSize> = self
            .allowed(registry)
            .iter()
            .filter_map(|name| self.get(name))
            .collect();
        sizes.sort_by(|a, b| a.name.cmp(&b.name));
        sizes.dedup_by(|a, b| a.name == b.name);
        sizes
    }
}

impl FromIterator<ImageSize> for ImageSizes {
    fn from_iter<I: IntoIterator<Item = ImageSize>>(iter: I) -> Self {
        let mut sizes = Self::new();
        for size in iter {
            sizes.insert(size);
        }
        sizes
    }
}

#[derive(Deserialize)]
struct Dimensions {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    crop: bool,
}

impl<'de> Deserialize<'de> for ImageSizes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = BTreeMap::<String, Dimensions>::deserialize(deserializer)?;
        Ok(table
            .into_iter()
            .map(|(name, d)| ImageSize::new(name, d.width, d.height, d.crop))
            .collect())
    }
}

/// The dimensions a thumbnail is requested at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailSize {
    /// A registered size selected by name.
    Named(ImageSize),
    /// Explicit width and height from the configuration.
    Explicit { width: u32, height: u32 },
}

impl ThumbnailSize {
    /// Picks the size for `config`.
    ///
    /// A non-empty `thumb_size` naming an allowed, registered size wins;
    /// anything else falls back to the explicit dimensions.
    pub fn for_configuration(config: &Configuration, allowed: &[&ImageSize]) -> Self {
        if !config.thumb_size.is_empty() {
            if let Some(size) = allowed.iter().find(|s| s.name == config.thumb_size) {
                return ThumbnailSize::Named((*size).clone());
            }
            debug!(
                "Image size '{}' is not registered, using {}x{}",
                config.thumb_size, config.thumb_size_w, config.thumb_size_h
            );
        }

        ThumbnailSize::Explicit {
            width: config.thumb_size_w,
            height: config.thumb_size_h,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            ThumbnailSize::Named(size) => size.width,
            ThumbnailSize::Explicit { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ThumbnailSize::Named(size) => size.height,
            ThumbnailSize::Explicit { height, .. } => *height,
        }
    }

    /// The `size-<name>` class of a named size.
    pub fn class(&self) -> Option<String> {
        match self {
            ThumbnailSize::Named(size) => Some(format!("size-{}", size.name)),
            ThumbnailSize::Explicit { .. } => None,
        }
    }
}

/// The host's media subsystem: resolves a term's image at a given size.
pub trait ThumbnailSource {
    /// Returns the image URL, or `None` when the term has no image.
    fn thumbnail_url(&self, term: &Term, size: &ThumbnailSize) -> Option<String>;
}

/// Uses the image URL carried on the term record, whatever the size.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermImageSource;

impl ThumbnailSource for TermImageSource {
    fn thumbnail_url(&self, term: &Term, _size: &ThumbnailSize) -> Option<String> {
        term.image.clone().filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sizes() -> ImageSizes {
        [
            ImageSize::new("thumbnail", 150, 150, true),
            ImageSize::new("medium", 300, 300, false),
            ImageSize::new("large", 1024, 1024, false),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_deserialize_table() {
        let sizes: ImageSizes = serde_json::from_value(json!({
            "thumbnail": { "width": 150, "height": 150, "crop": true },
            "square": { "width": 80 }
        }))
        .unwrap();

        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.get("thumbnail"), Some(&ImageSize::new("thumbnail", 150, 150, true)));
        assert_eq!(sizes.get("square").map(|s| s.height), Some(0));
    }

    #[test]
    fn test_allowed_unfiltered() {
        let registry = ExtensionRegistry::new();
        assert_eq!(sizes().allowed(&registry), vec!["large", "medium", "thumbnail"]);
    }

    #[test]
    fn test_allowed_filter_removes_size() {
        let mut registry = ExtensionRegistry::new();
        registry.register(FilterPoint::AllowedImageSizes, 10, |mut table, _| {
            if let Some(map) = table.as_object_mut() {
                map.remove("large");
                map.insert("ghost".into(), json!("ghost"));
            }
            Ok(table)
        });

        let sizes = sizes();
        assert_eq!(sizes.allowed(&registry), vec!["ghost", "medium", "thumbnail"]);

        let names: Vec<&str> = sizes
            .allowed_sizes(&registry)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["medium", "thumbnail"]);
    }

    #[test]
    fn test_named_size_wins() {
        let config = Configuration {
            thumb_size: "medium".into(),
            ..Configuration::builtin()
        };
        let sizes = sizes();
        let allowed = sizes.allowed_sizes(&ExtensionRegistry::new());

        let size = ThumbnailSize::for_configuration(&config, &allowed);
        assert_eq!(size.width(), 300);
        assert_eq!(size.class().as_deref(), Some("size-medium"));
    }

    #[test]
    fn test_unknown_size_falls_back_to_explicit() {
        let config = Configuration {
            thumb_size: "poster".into(),
            thumb_size_w: 64,
            thumb_size_h: 48,
            ..Configuration::builtin()
        };

        let size = ThumbnailSize::for_configuration(&config, &[]);
        assert_eq!(size, ThumbnailSize::Explicit { width: 64, height: 48 });
        assert_eq!(size.class(), None);
    }

    #[test]
    fn test_term_image_source() {
        let size = ThumbnailSize::Explicit { width: 1, height: 1 };
        let with_image = Term::new(1, "A", "/a").with_image("/a.png");
        let blank_image = Term::new(2, "B", "/b").with_image("  ");

        assert_eq!(
            TermImageSource.thumbnail_url(&with_image, &size).as_deref(),
            Some("/a.png")
        );
        assert_eq!(TermImageSource.thumbnail_url(&blank_image, &size), None);
    }
}
