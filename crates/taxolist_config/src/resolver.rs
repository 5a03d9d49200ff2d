//! Merging raw settings with typed defaults.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use taxolist_hooks::{ActionPoint, ExtensionRegistry, FilterPoint, HookArgs};
use taxolist_text::{sanitize_key, sanitize_text_field};

use crate::configuration::keys;
use crate::value::{to_flag, to_term_ids, to_text, to_uint};
use crate::{Configuration, ListStyle, OrderBy, SortOrder};

/// Turns raw settings mappings into validated [`Configuration`]s.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use taxolist_config::{ConfigurationResolver, ListStyle};
///
/// let resolver = ConfigurationResolver::new();
/// let raw = json!({ "listStyle": "span", "thumbSizeW": 80 });
/// let config = resolver.resolve(raw.as_object().unwrap());
///
/// assert_eq!(config.list_style, ListStyle::Ul);
/// assert_eq!(config.thumb_size_h, 55);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    defaults: Configuration,
}

impl ConfigurationResolver {
    /// Creates a resolver using the built-in defaults table.
    pub fn new() -> Self {
        Self {
            defaults: Configuration::builtin(),
        }
    }

    /// Creates a resolver whose defaults are `table` normalized against the
    /// built-in defaults.
    pub fn with_defaults(table: &Map<String, Value>) -> Self {
        let builtin = Configuration::builtin();
        Self {
            defaults: normalize(table, &builtin, &builtin),
        }
    }

    /// Creates a resolver whose defaults went through the
    /// `configurationDefaults` filter.
    pub fn from_registry(registry: &ExtensionRegistry) -> Self {
        let builtin = Configuration::builtin();
        if !registry.has_filter(FilterPoint::ConfigurationDefaults) {
            return Self { defaults: builtin };
        }

        match registry.invoke(
            FilterPoint::ConfigurationDefaults,
            builtin.to_value(),
            &HookArgs::new(),
        ) {
            Value::Object(table) => Self::with_defaults(&table),
            other => {
                warn!(
                    "Ignoring filtered defaults: expected an object, got {}",
                    kind_of(&other)
                );
                Self { defaults: builtin }
            }
        }
    }

    /// The defaults absent keys are filled from.
    pub fn defaults(&self) -> &Configuration {
        &self.defaults
    }

    /// Resolves a raw settings mapping.
    ///
    /// Absent keys take their default; present keys are normalized. Keys the
    /// resolver does not own are preserved in [`Configuration::extra`].
    pub fn resolve(&self, raw: &Map<String, Value>) -> Configuration {
        normalize(raw, &self.defaults, &self.defaults)
    }

    /// Merges `new` over a stored configuration.
    ///
    /// Keys absent from `new` keep their stored value; present keys follow
    /// the same rules as [`resolve`](Self::resolve).
    pub fn resolve_update(&self, new: &Map<String, Value>, old: &Configuration) -> Configuration {
        normalize(new, old, &self.defaults)
    }

    /// Runs [`resolve_update`](Self::resolve_update), then the
    /// `instanceUpdate` filter and the `instanceUpdated` action.
    ///
    /// The filter receives the merged configuration; its context carries the
    /// raw update as `instance` and the stored configuration as `previous`.
    /// Its result is resolved again, so a filter cannot store invalid values.
    pub fn resolve_update_with(
        &self,
        registry: &ExtensionRegistry,
        new: &Map<String, Value>,
        old: &Configuration,
    ) -> Configuration {
        let merged = self.resolve_update(new, old);

        let previous = old.to_value();
        let update = Value::Object(new.clone());
        let args = HookArgs::new()
            .with_previous(&previous)
            .with_instance(&update);

        let config = if registry.has_filter(FilterPoint::InstanceUpdate) {
            match registry.invoke(FilterPoint::InstanceUpdate, merged.to_value(), &args) {
                Value::Object(filtered) => self.resolve_update(&filtered, &merged),
                other => {
                    warn!(
                        "Ignoring filtered update: expected an object, got {}",
                        kind_of(&other)
                    );
                    merged
                }
            }
        } else {
            merged
        };

        let resolved = config.to_value();
        registry.notify(
            ActionPoint::InstanceUpdated,
            &HookArgs::new()
                .with_instance(&resolved)
                .with_previous(&previous),
        );

        config
    }
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalizes `raw` key by key.
///
/// `base` supplies values for absent keys, `defaults` supplies fallbacks for
/// present keys whose value is unusable.
fn normalize(
    raw: &Map<String, Value>,
    base: &Configuration,
    defaults: &Configuration,
) -> Configuration {
    let title = raw
        .get(keys::TITLE)
        .map_or_else(|| base.title.clone(), |v| sanitize_text_field(&to_text(v)));

    let orderby = match raw.get(keys::ORDERBY) {
        None => base.orderby,
        Some(v) => {
            let text = to_text(v);
            OrderBy::parse(&text).unwrap_or_else(|| {
                debug!("Unknown orderby '{}', using '{}'", text, defaults.orderby);
                defaults.orderby
            })
        }
    };

    let order = match raw.get(keys::ORDER) {
        None => base.order,
        Some(v) => {
            let text = to_text(v);
            SortOrder::parse(&text).unwrap_or_else(|| {
                debug!("Unknown order '{}', using '{}'", text, defaults.order);
                defaults.order
            })
        }
    };

    let tax_term = raw
        .get(keys::TAX_TERM)
        .map_or_else(|| base.tax_term.clone(), to_term_ids);

    let thumb_size = match raw.get(keys::THUMB_SIZE) {
        None => base.thumb_size.clone(),
        Some(v) => {
            let size = sanitize_text_field(&to_text(v));
            if size == "0" { String::new() } else { size }
        }
    };

    let thumb_size_w = match raw.get(keys::THUMB_SIZE_W).map(to_uint) {
        None => base.thumb_size_w,
        Some(0) => defaults.thumb_size_w.max(1),
        Some(w) => w,
    };

    // An unusable height follows the resolved width.
    let thumb_size_h = match raw.get(keys::THUMB_SIZE_H).map(to_uint) {
        None if base.thumb_size_h >= 1 => base.thumb_size_h,
        None | Some(0) => thumb_size_w,
        Some(h) => h,
    };

    let list_style = match raw.get(keys::LIST_STYLE) {
        None => base.list_style,
        Some(v) => {
            let key = sanitize_key(&to_text(v));
            ListStyle::parse(&key).unwrap_or_else(|| {
                debug!("Unknown listStyle '{}', using 'ul'", key);
                ListStyle::Ul
            })
        }
    };

    let flag_or = |key: &str, fallback: bool| raw.get(key).map_or(fallback, to_flag);

    let mut extra = base.extra.clone();
    for (key, value) in raw {
        if !keys::ALL.contains(&key.as_str()) {
            extra.insert(key.clone(), value.clone());
        }
    }

    Configuration {
        title,
        orderby,
        order,
        tax_term,
        show_thumb: flag_or(keys::SHOW_THUMB, base.show_thumb),
        thumb_size,
        thumb_size_w,
        thumb_size_h,
        show_desc: flag_or(keys::SHOW_DESC, base.show_desc),
        desc_length: raw.get(keys::DESC_LENGTH).map_or(base.desc_length, to_uint),
        list_style,
        show_count: flag_or(keys::SHOW_COUNT, base.show_count),
        css_default: flag_or(keys::CSS_DEFAULT, base.css_default),
        extra,
    }
}
