//! Named extension points exposed by the renderer.
//!
//! Points are addressed by name, so third parties can also register against
//! names that are not listed here. The enums below only cover the points the
//! renderer itself invokes.

use std::fmt;
use std::str::FromStr;

/// Filter points: each one receives a value and returns a (possibly
/// transformed) value of the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterPoint {
    /// Opening container tag of the list.
    ListOpenMarkup,
    /// Opening tag of a single item.
    ListItemOpenMarkup,
    /// Closing tag of a single item.
    ListItemCloseMarkup,
    /// Closing container tag of the list.
    ListCloseMarkup,
    /// Title text of a single term.
    ItemTitle,
    /// Complete thumbnail fragment of a term.
    ThumbnailMarkup,
    /// Classes placed on the thumbnail `<img>`.
    ThumbnailClassList,
    /// Classes placed on the span wrapping the thumbnail.
    ThumbnailWrapClassList,
    /// Post count badge of a term.
    PostCountMarkup,
    /// Classes placed on the list container.
    ListClassList,
    /// Classes placed on each item tag.
    ItemClassList,
    /// Excerpt text of a term.
    ExcerptText,
    /// Default configuration table.
    ConfigurationDefaults,
    /// Sample excerpt shown in previews.
    SampleExcerptText,
    /// Taxonomies that can be selected.
    AllowedTaxonomies,
    /// Image sizes that can be selected.
    AllowedImageSizes,
    /// Configuration produced by an update.
    InstanceUpdate,
    /// Heading text of the widget.
    WidgetTitle,
}

impl FilterPoint {
    /// Every filter point, in declaration order.
    pub const ALL: [FilterPoint; 18] = [
        FilterPoint::ListOpenMarkup,
        FilterPoint::ListItemOpenMarkup,
        FilterPoint::ListItemCloseMarkup,
        FilterPoint::ListCloseMarkup,
        FilterPoint::ItemTitle,
        FilterPoint::ThumbnailMarkup,
        FilterPoint::ThumbnailClassList,
        FilterPoint::ThumbnailWrapClassList,
        FilterPoint::PostCountMarkup,
        FilterPoint::ListClassList,
        FilterPoint::ItemClassList,
        FilterPoint::ExcerptText,
        FilterPoint::ConfigurationDefaults,
        FilterPoint::SampleExcerptText,
        FilterPoint::AllowedTaxonomies,
        FilterPoint::AllowedImageSizes,
        FilterPoint::InstanceUpdate,
        FilterPoint::WidgetTitle,
    ];

    /// Returns the registration name of the point.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPoint::ListOpenMarkup => "listOpenMarkup",
            FilterPoint::ListItemOpenMarkup => "listItemOpenMarkup",
            FilterPoint::ListItemCloseMarkup => "listItemCloseMarkup",
            FilterPoint::ListCloseMarkup => "listCloseMarkup",
            FilterPoint::ItemTitle => "itemTitle",
            FilterPoint::ThumbnailMarkup => "thumbnailMarkup",
            FilterPoint::ThumbnailClassList => "thumbnailClassList",
            FilterPoint::ThumbnailWrapClassList => "thumbnailWrapClassList",
            FilterPoint::PostCountMarkup => "postCountMarkup",
            FilterPoint::ListClassList => "listClassList",
            FilterPoint::ItemClassList => "itemClassList",
            FilterPoint::ExcerptText => "excerptText",
            FilterPoint::ConfigurationDefaults => "configurationDefaults",
            FilterPoint::SampleExcerptText => "sampleExcerptText",
            FilterPoint::AllowedTaxonomies => "allowedTaxonomies",
            FilterPoint::AllowedImageSizes => "allowedImageSizes",
            FilterPoint::InstanceUpdate => "instanceUpdate",
            FilterPoint::WidgetTitle => "widgetTitle",
        }
    }
}

/// Notification points: callbacks run for their side effects and their
/// results are not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPoint {
    /// Before anything of an item's content block is produced.
    ItemBefore,
    /// Inside the item content block, before the header.
    ItemTop,
    /// Inside the item content block, after the excerpt.
    ItemBottom,
    /// After an item's content block.
    ItemAfter,
    /// Before the list container opens.
    ListBefore,
    /// After the list container closes.
    ListAfter,
    /// After the widget heading.
    TitleAfter,
    /// After an instance update has been resolved.
    InstanceUpdated,
}

impl ActionPoint {
    /// Every action point, in declaration order.
    pub const ALL: [ActionPoint; 8] = [
        ActionPoint::ItemBefore,
        ActionPoint::ItemTop,
        ActionPoint::ItemBottom,
        ActionPoint::ItemAfter,
        ActionPoint::ListBefore,
        ActionPoint::ListAfter,
        ActionPoint::TitleAfter,
        ActionPoint::InstanceUpdated,
    ];

    /// Returns the registration name of the point.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionPoint::ItemBefore => "itemBefore",
            ActionPoint::ItemTop => "itemTop",
            ActionPoint::ItemBottom => "itemBottom",
            ActionPoint::ItemAfter => "itemAfter",
            ActionPoint::ListBefore => "listBefore",
            ActionPoint::ListAfter => "listAfter",
            ActionPoint::TitleAfter => "titleAfter",
            ActionPoint::InstanceUpdated => "instanceUpdated",
        }
    }
}

impl AsRef<str> for FilterPoint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ActionPoint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FilterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown point name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown extension point: {0}")]
pub struct UnknownPoint(pub String);

impl FromStr for FilterPoint {
    type Err = UnknownPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterPoint::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPoint(s.to_string()))
    }
}

impl FromStr for ActionPoint {
    type Err = UnknownPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionPoint::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPoint(s.to_string()))
    }
}
