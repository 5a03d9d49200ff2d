//! Option lists offered to the settings form.

use std::collections::BTreeMap;

use taxolist_hooks::{ExtensionRegistry, FilterPoint, HookArgs};
use taxolist_text::sanitize_select_options;

const SAMPLE_EXCERPT: &str = "The point of the foundation is to ensure free access, in perpetuity, \
to the software projects we support. People and businesses may come and go, so it is important \
to ensure that the source code for these projects will survive beyond the current contributor \
base, that we may create a stable platform for web publishing for generations to come.";

/// Taxonomies that can be selected, as `(key, label)` pairs sorted by label.
///
/// The built-in `{key: label}` table goes through the `allowedTaxonomies` filter and is then
/// sanitized, since extensions may return anything.
pub fn allowed_taxonomies(registry: &ExtensionRegistry) -> Vec<(String, String)> {
    let builtin = BTreeMap::from([("category".to_string(), "Category".to_string())]);
    let taxonomies: BTreeMap<String, String> =
        registry.invoke_as(FilterPoint::AllowedTaxonomies, builtin, &HookArgs::new());
    sanitize_select_options(taxonomies)
}

/// Placeholder description used when previewing excerpts.
pub fn sample_excerpt(registry: &ExtensionRegistry) -> String {
    registry.invoke_str(
        FilterPoint::SampleExcerptText,
        SAMPLE_EXCERPT.to_string(),
        &HookArgs::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_allowed_taxonomies_default() {
        let registry = ExtensionRegistry::new();
        assert_eq!(
            allowed_taxonomies(&registry),
            vec![("category".to_string(), "Category".to_string())]
        );
    }

    #[test]
    fn test_allowed_taxonomies_filtered() {
        let mut registry = ExtensionRegistry::new();
        registry.register(FilterPoint::AllowedTaxonomies, 10, |mut taxonomies, _| {
            if let Some(map) = taxonomies.as_object_mut() {
                map.insert("Post_Tag".into(), json!("Tags"));
                map.insert("genre".into(), json!("<i>Genres</i>"));
            }
            Ok(taxonomies)
        });

        assert_eq!(
            allowed_taxonomies(&registry),
            vec![
                ("genre".to_string(), "&lt;i&gt;Genres&lt;/i&gt;".to_string()),
                ("category".to_string(), "Category".to_string()),
                ("post_tag".to_string(), "Tags".to_string()),
            ]
        );
    }

    #[test]
    fn test_sample_excerpt_filtered() {
        let mut registry = ExtensionRegistry::new();
        registry.register(FilterPoint::SampleExcerptText, 10, |_, _| Ok(json!("Short.")));
        assert_eq!(sample_excerpt(&registry), "Short.");
        assert!(sample_excerpt(&ExtensionRegistry::new()).starts_with("The point"));
    }
}
