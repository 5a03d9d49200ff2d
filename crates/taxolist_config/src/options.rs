//! Enumerated settings.

use std::fmt;

/// Term ordering key handed to the term source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderBy {
    #[default]
    Name,
    Slug,
    TermGroup,
    TermId,
    Id,
    Description,
    Parent,
    Count,
    None,
}

impl OrderBy {
    const ALL: [OrderBy; 9] = [
        OrderBy::Name,
        OrderBy::Slug,
        OrderBy::TermGroup,
        OrderBy::TermId,
        OrderBy::Id,
        OrderBy::Description,
        OrderBy::Parent,
        OrderBy::Count,
        OrderBy::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::Slug => "slug",
            OrderBy::TermGroup => "term_group",
            OrderBy::TermId => "term_id",
            OrderBy::Id => "id",
            OrderBy::Description => "description",
            OrderBy::Parent => "parent",
            OrderBy::Count => "count",
            OrderBy::None => "none",
        }
    }

    /// Parses a case-insensitive ordering key.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Parses a case-insensitive direction.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Markup shape of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListStyle {
    #[default]
    Ul,
    Ol,
    Div,
}

impl ListStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListStyle::Ul => "ul",
            ListStyle::Ol => "ol",
            ListStyle::Div => "div",
        }
    }

    /// Parses an already key-sanitized style name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ul" => Some(ListStyle::Ul),
            "ol" => Some(ListStyle::Ol),
            "div" => Some(ListStyle::Div),
            _ => None,
        }
    }

    /// Tag wrapping the whole list.
    pub fn container_tag(&self) -> &'static str {
        self.as_str()
    }

    /// Tag wrapping each item.
    pub fn item_tag(&self) -> &'static str {
        match self {
            ListStyle::Ul | ListStyle::Ol => "li",
            ListStyle::Div => "div",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(OrderBy, SortOrder, ListStyle);
