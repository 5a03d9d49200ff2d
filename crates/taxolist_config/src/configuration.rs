//! Resolved per-instance configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{ConfigurationResolver, ListStyle, OrderBy, SortOrder};

/// Setting names as they appear in a raw settings mapping.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const ORDERBY: &str = "orderby";
    pub const ORDER: &str = "order";
    pub const TAX_TERM: &str = "taxTerm";
    pub const SHOW_THUMB: &str = "showThumb";
    pub const THUMB_SIZE: &str = "thumbSize";
    pub const THUMB_SIZE_W: &str = "thumbSizeW";
    pub const THUMB_SIZE_H: &str = "thumbSizeH";
    pub const SHOW_DESC: &str = "showDesc";
    pub const DESC_LENGTH: &str = "descLength";
    pub const LIST_STYLE: &str = "listStyle";
    pub const SHOW_COUNT: &str = "showCount";
    pub const CSS_DEFAULT: &str = "cssDefault";

    /// Every key the resolver owns.
    pub const ALL: [&str; 13] = [
        TITLE,
        ORDERBY,
        ORDER,
        TAX_TERM,
        SHOW_THUMB,
        THUMB_SIZE,
        THUMB_SIZE_W,
        THUMB_SIZE_H,
        SHOW_DESC,
        DESC_LENGTH,
        LIST_STYLE,
        SHOW_COUNT,
        CSS_DEFAULT,
    ];
}

/// Fully resolved settings of one list instance.
///
/// Built only by [`ConfigurationResolver`], which guarantees every field is
/// populated and valid: `thumb_size_w` and `thumb_size_h` are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Heading text; empty disables the heading.
    pub title: String,
    pub orderby: OrderBy,
    pub order: SortOrder,
    /// Terms eligible for the list; empty means no restriction.
    pub tax_term: BTreeSet<u64>,
    pub show_thumb: bool,
    /// Registered image size name; empty selects the explicit dimensions.
    pub thumb_size: String,
    pub thumb_size_w: u32,
    pub thumb_size_h: u32,
    pub show_desc: bool,
    /// Excerpt word limit.
    pub desc_length: u32,
    pub list_style: ListStyle,
    pub show_count: bool,
    /// Whether the default stylesheet should be loaded for this instance.
    pub css_default: bool,
    /// Keys the resolver does not own, carried through untouched.
    pub extra: Map<String, Value>,
}

impl Configuration {
    /// The built-in defaults table.
    pub fn builtin() -> Self {
        Self {
            title: "Categories".to_string(),
            orderby: OrderBy::Name,
            order: SortOrder::Desc,
            tax_term: BTreeSet::new(),
            show_thumb: false,
            thumb_size: String::new(),
            thumb_size_w: 55,
            thumb_size_h: 55,
            show_desc: true,
            desc_length: 15,
            list_style: ListStyle::Ul,
            show_count: false,
            css_default: false,
            extra: Map::new(),
        }
    }

    /// Returns the configuration as a raw settings mapping.
    ///
    /// Feeding the result back through [`ConfigurationResolver::resolve`]
    /// yields an equal configuration.
    pub fn as_partial(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert(keys::TITLE.into(), Value::String(self.title.clone()));
        map.insert(keys::ORDERBY.into(), self.orderby.as_str().into());
        map.insert(keys::ORDER.into(), self.order.as_str().into());
        map.insert(
            keys::TAX_TERM.into(),
            Value::Array(self.tax_term.iter().map(|id| Value::from(*id)).collect()),
        );
        map.insert(keys::SHOW_THUMB.into(), flag(self.show_thumb));
        map.insert(keys::THUMB_SIZE.into(), Value::String(self.thumb_size.clone()));
        map.insert(keys::THUMB_SIZE_W.into(), self.thumb_size_w.into());
        map.insert(keys::THUMB_SIZE_H.into(), self.thumb_size_h.into());
        map.insert(keys::SHOW_DESC.into(), flag(self.show_desc));
        map.insert(keys::DESC_LENGTH.into(), self.desc_length.into());
        map.insert(keys::LIST_STYLE.into(), self.list_style.as_str().into());
        map.insert(keys::SHOW_COUNT.into(), flag(self.show_count));
        map.insert(keys::CSS_DEFAULT.into(), flag(self.css_default));
        map
    }

    /// Returns the configuration as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.as_partial())
    }

    /// Looks up a key the resolver does not own.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::builtin()
    }
}

fn flag(on: bool) -> Value {
    Value::from(u8::from(on))
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_partial().serialize(serializer)
    }
}

/// Deserializing resolves the mapping against the built-in defaults, so any
/// object is accepted.
impl<'de> Deserialize<'de> for Configuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(ConfigurationResolver::new().resolve(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_as_partial_shape() {
        let mut config = Configuration::builtin();
        config.tax_term = [3, 1].into_iter().collect();
        config.extra.insert("widgetId".into(), json!("cats-2"));

        assert_eq!(
            Value::Object(config.as_partial()),
            json!({
                "title": "Categories",
                "orderby": "name",
                "order": "desc",
                "taxTerm": [1, 3],
                "showThumb": 0,
                "thumbSize": "",
                "thumbSizeW": 55,
                "thumbSizeH": 55,
                "showDesc": 1,
                "descLength": 15,
                "listStyle": "ul",
                "showCount": 0,
                "cssDefault": 0,
                "widgetId": "cats-2"
            })
        );
    }

    #[test]
    fn test_deserialize_resolves() {
        let config: Configuration =
            serde_json::from_value(json!({ "listStyle": "OL", "descLength": "-3" })).unwrap();
        assert_eq!(config.list_style, ListStyle::Ol);
        assert_eq!(config.desc_length, 0);
        assert_eq!(config.title, "Categories");
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_value::<Configuration>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_serialize_matches_partial() {
        let config = Configuration::builtin();
        assert_eq!(serde_json::to_value(&config).unwrap(), config.to_value());
    }
}
