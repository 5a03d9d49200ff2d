//! Per-term display data.

use serde_json::Value;

use taxolist_config::Configuration;
use taxolist_hooks::{ExtensionRegistry, FilterPoint, HookArgs};
use taxolist_text::{escape_html, escape_url, sanitize_html_class, trim_words};

use crate::images::{ImageSizes, ThumbnailSize, ThumbnailSource};
use crate::Term;

/// Prefix of every class and id this crate emits.
pub const CLASS_PREFIX: &str = "taxolist";

/// Display data derived from one term.
///
/// Markup fields are ready to emit; `title` and `excerpt_text` are plain text
/// and still need escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// DOM id of the item.
    pub id: String,
    /// Sanitized classes of the item tag.
    pub class_list: Vec<String>,
    pub title: String,
    /// Empty when thumbnails are off or the term has no image.
    pub thumbnail_markup: String,
    /// Empty when excerpts are off.
    pub excerpt_text: String,
    /// Empty when counts are off.
    pub count_markup: String,
}

impl Presentation {
    /// The class attribute value.
    pub fn class_attr(&self) -> String {
        self.class_list.join(" ")
    }
}

/// Derives a DOM id from the term's identifier.
///
/// Terms without an identifier fall back to their slug. Ids are unique as
/// long as identifiers are; the renderer disambiguates repeats.
pub fn term_dom_id(term: &Term) -> String {
    if term.id != 0 {
        format!("{CLASS_PREFIX}-term-{}", term.id)
    } else if !term.slug.is_empty() {
        sanitize_html_class(&format!("{CLASS_PREFIX}-term-{}", term.slug))
    } else {
        format!("{CLASS_PREFIX}-term")
    }
}

/// Sanitizes each class, dropping any that end up empty.
pub(crate) fn sanitize_classes(classes: Vec<String>) -> Vec<String> {
    classes
        .iter()
        .map(|c| sanitize_html_class(c))
        .filter(|c| !c.is_empty())
        .collect()
}

/// Computes [`Presentation`]s, routing every derived piece through its
/// extension point.
pub struct PresentationResolver<'a> {
    registry: &'a ExtensionRegistry,
    sizes: &'a ImageSizes,
    thumbnails: &'a dyn ThumbnailSource,
}

impl<'a> PresentationResolver<'a> {
    pub fn new(
        registry: &'a ExtensionRegistry,
        sizes: &'a ImageSizes,
        thumbnails: &'a dyn ThumbnailSource,
    ) -> Self {
        Self {
            registry,
            sizes,
            thumbnails,
        }
    }

    /// Picks the thumbnail size for `config` among the allowed sizes.
    pub fn thumbnail_size(&self, config: &Configuration) -> ThumbnailSize {
        let allowed = self.sizes.allowed_sizes(self.registry);
        ThumbnailSize::for_configuration(config, &allowed)
    }

    /// Resolves the presentation of a single term.
    pub fn resolve(&self, term: &Term, config: &Configuration) -> Presentation {
        let instance = config.to_value();
        let term_json = term_value(term);
        let args = HookArgs::new()
            .with_instance(&instance)
            .with_term(&term_json);
        let size = self.thumbnail_size(config);

        self.resolve_with(term, config, &size, &args)
    }

    /// Resolves a term with a precomputed size and hook context.
    pub(crate) fn resolve_with(
        &self,
        term: &Term,
        config: &Configuration,
        size: &ThumbnailSize,
        args: &HookArgs<'_>,
    ) -> Presentation {
        Presentation {
            id: term_dom_id(term),
            class_list: self.class_list(term, args),
            title: self
                .registry
                .invoke_str(FilterPoint::ItemTitle, term.name.clone(), args),
            thumbnail_markup: if config.show_thumb {
                self.thumbnail_markup(term, size, args)
            } else {
                String::new()
            },
            excerpt_text: if config.show_desc {
                self.excerpt_text(term, config, args)
            } else {
                String::new()
            },
            count_markup: if config.show_count {
                self.count_markup(term, args)
            } else {
                String::new()
            },
        }
    }

    fn class_list(&self, term: &Term, args: &HookArgs<'_>) -> Vec<String> {
        let mut classes = vec![format!("{CLASS_PREFIX}-item")];
        if !term.slug.is_empty() {
            classes.push(format!("term-{}", term.slug));
        }

        sanitize_classes(
            self.registry
                .invoke_list(FilterPoint::ItemClassList, classes, args),
        )
    }

    fn thumbnail_markup(&self, term: &Term, size: &ThumbnailSize, args: &HookArgs<'_>) -> String {
        let markup = match self.thumbnails.thumbnail_url(term, size) {
            Some(url) => {
                let mut img_classes = vec![
                    format!("{CLASS_PREFIX}-term-image"),
                    format!("{CLASS_PREFIX}-alignleft"),
                ];
                img_classes.extend(size.class());
                let img_classes = sanitize_classes(self.registry.invoke_list(
                    FilterPoint::ThumbnailClassList,
                    img_classes,
                    args,
                ));

                let wrap_classes = sanitize_classes(self.registry.invoke_list(
                    FilterPoint::ThumbnailWrapClassList,
                    vec![format!("{CLASS_PREFIX}-term-thumbnail")],
                    args,
                ));

                format!(
                    r#"<span class="{}"><a href="{}"><img width="{}" height="{}" src="{}" class="{}" alt="{}" /></a></span>"#,
                    wrap_classes.join(" "),
                    escape_url(&term.permalink),
                    size.width(),
                    size.height(),
                    escape_url(&url),
                    img_classes.join(" "),
                    escape_html(&term.name),
                )
            }
            None => String::new(),
        };

        self.registry
            .invoke_str(FilterPoint::ThumbnailMarkup, markup, args)
    }

    fn excerpt_text(&self, term: &Term, config: &Configuration, args: &HookArgs<'_>) -> String {
        let limit = usize::try_from(config.desc_length).unwrap_or(usize::MAX);
        let excerpt = trim_words(&term.description, limit);
        self.registry
            .invoke_str(FilterPoint::ExcerptText, excerpt, args)
    }

    fn count_markup(&self, term: &Term, args: &HookArgs<'_>) -> String {
        let markup = format!(
            r#"<span class="{CLASS_PREFIX}-post-count term-post-count"><span class="screen-reader-text">Post count </span><a href="{}" rel="bookmark">{}</a></span>"#,
            escape_url(&term.permalink),
            term.count,
        );
        self.registry
            .invoke_str(FilterPoint::PostCountMarkup, markup, args)
    }
}

/// Builds the hook context value of a term.
pub(crate) fn term_value(term: &Term) -> Value {
    serde_json::to_value(term).unwrap_or_default()
}
