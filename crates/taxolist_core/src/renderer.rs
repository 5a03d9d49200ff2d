//! List assembly.

use std::collections::HashMap;
use std::fmt::Write;

use serde_json::Value;
use tracing::{debug, warn};

use taxolist_config::Configuration;
use taxolist_hooks::{ActionPoint, ExtensionRegistry, FilterPoint, HookArgs};
use taxolist_text::{escape_html, escape_url};

use crate::error::RenderError;
use crate::images::{ImageSizes, ThumbnailSize, ThumbnailSource};
use crate::presentation::{
    CLASS_PREFIX, Presentation, PresentationResolver, sanitize_classes, term_value,
};
use crate::Term;

/// Renders term lists.
///
/// Every emitted fragment passes through its filter point in the registry.
/// The registry is borrowed immutably for the whole pass, so callbacks must
/// be registered before rendering starts.
///
/// # Example
///
/// ```rust
/// use taxolist_config::ConfigurationResolver;
/// use taxolist_core::{ImageSizes, ListRenderer, Term, TermImageSource};
/// use taxolist_hooks::ExtensionRegistry;
///
/// let registry = ExtensionRegistry::new();
/// let sizes = ImageSizes::new();
/// let renderer = ListRenderer::new(&registry, &sizes, &TermImageSource);
///
/// let config = ConfigurationResolver::new().resolve(&Default::default());
/// let html = renderer.render(&[Term::new(1, "News", "/news")], &config);
///
/// assert!(html.starts_with("<ul class=\"taxolist-list\">"));
/// ```
pub struct ListRenderer<'a> {
    registry: &'a ExtensionRegistry,
    presentation: PresentationResolver<'a>,
}

impl<'a> ListRenderer<'a> {
    pub fn new(
        registry: &'a ExtensionRegistry,
        sizes: &'a ImageSizes,
        thumbnails: &'a dyn ThumbnailSource,
    ) -> Self {
        Self {
            registry,
            presentation: PresentationResolver::new(registry, sizes, thumbnails),
        }
    }

    pub fn registry(&self) -> &'a ExtensionRegistry {
        self.registry
    }

    /// The resolver used for each item.
    pub fn presentation(&self) -> &PresentationResolver<'a> {
        &self.presentation
    }

    /// Renders `terms`, in the order given, into a string.
    pub fn render(&self, terms: &[Term], config: &Configuration) -> String {
        let mut out = String::new();
        if let Err(e) = self.render_to(&mut out, terms, config) {
            // Unreachable for a String sink.
            warn!("Render failed: {}", e);
        }
        out
    }

    /// Renders `terms` into `out`.
    ///
    /// Only a failing sink produces an error; whatever was written before the
    /// failure stays in `out`.
    pub fn render_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        terms: &[Term],
        config: &Configuration,
    ) -> Result<(), RenderError> {
        let instance = config.to_value();
        let all_terms = serde_json::to_value(terms).unwrap_or_default();
        let mut pass = RenderPass {
            registry: self.registry,
            presentation: &self.presentation,
            config,
            instance: &instance,
            terms: &all_terms,
            size: self.presentation.thumbnail_size(config),
            seen_ids: HashMap::new(),
        };

        pass.open(out)?;
        for term in terms {
            pass.item(out, term)?;
        }
        pass.close(out)?;

        debug!(
            "Rendered {} term(s) as <{}>",
            terms.len(),
            config.list_style.container_tag()
        );
        Ok(())
    }
}

/// State of one render call.
struct RenderPass<'r, 'a> {
    registry: &'a ExtensionRegistry,
    presentation: &'r PresentationResolver<'a>,
    config: &'r Configuration,
    instance: &'r Value,
    terms: &'r Value,
    size: ThumbnailSize,
    /// Occurrences of each DOM id emitted so far.
    seen_ids: HashMap<String, usize>,
}

impl<'r> RenderPass<'r, '_> {
    fn args(&self) -> HookArgs<'r> {
        HookArgs::new()
            .with_instance(self.instance)
            .with_terms(self.terms)
    }

    fn open<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), RenderError> {
        let args = self.args();
        let classes = sanitize_classes(self.registry.invoke_list(
            FilterPoint::ListClassList,
            vec![format!("{CLASS_PREFIX}-list")],
            &args,
        ));
        let markup = format!(
            r#"<{} class="{}">"#,
            self.config.list_style.container_tag(),
            classes.join(" ")
        );

        let markup = self
            .registry
            .invoke_str(FilterPoint::ListOpenMarkup, markup, &args);
        writeln!(out, "{markup}")?;
        Ok(())
    }

    fn item<W: Write + ?Sized>(&mut self, out: &mut W, term: &Term) -> Result<(), RenderError> {
        let term_json = term_value(term);
        let args = self.args().with_term(&term_json);

        let mut presentation =
            self.presentation
                .resolve_with(term, self.config, &self.size, &args);
        presentation.id = self.unique_id(presentation.id);

        let item_tag = self.config.list_style.item_tag();
        let open = format!(
            r#"<{item_tag} id="{}" class="{}">"#,
            escape_html(&presentation.id),
            escape_html(&presentation.class_attr())
        );
        let open = self
            .registry
            .invoke_str(FilterPoint::ListItemOpenMarkup, open, &args);
        out.write_str(&open)?;

        self.registry.notify(ActionPoint::ItemBefore, &args);
        write!(out, r#"<div class="{CLASS_PREFIX}-term">"#)?;
        self.registry.notify(ActionPoint::ItemTop, &args);
        write_content(out, term, &presentation)?;
        self.registry.notify(ActionPoint::ItemBottom, &args);
        out.write_str("</div>")?;
        self.registry.notify(ActionPoint::ItemAfter, &args);

        let close = self.registry.invoke_str(
            FilterPoint::ListItemCloseMarkup,
            format!("</{item_tag}>"),
            &args,
        );
        writeln!(out, "{close}")?;
        Ok(())
    }

    fn close<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), RenderError> {
        let markup = format!("</{}>", self.config.list_style.container_tag());
        let markup = self
            .registry
            .invoke_str(FilterPoint::ListCloseMarkup, markup, &self.args());
        writeln!(out, "{markup}")?;
        Ok(())
    }

    /// Suffixes repeated ids with `-2`, `-3`, ...
    fn unique_id(&mut self, id: String) -> String {
        let seen = self.seen_ids.entry(id.clone()).or_insert(0);
        *seen += 1;
        if *seen == 1 {
            return id;
        }

        let mut n = *seen;
        loop {
            let candidate = format!("{id}-{n}");
            if !self.seen_ids.contains_key(&candidate) {
                self.seen_ids.insert(candidate.clone(), 1);
                return candidate;
            }
            n += 1;
        }
    }
}

/// Writes the header (thumbnail, title, count) and the optional summary.
fn write_content<W: Write + ?Sized>(
    out: &mut W,
    term: &Term,
    presentation: &Presentation,
) -> Result<(), RenderError> {
    write!(
        out,
        r#"<div class="term-header {CLASS_PREFIX}-term-header">{}<h3 class="{CLASS_PREFIX}-term-title"><a href="{}" rel="bookmark">{}</a></h3>{}</div>"#,
        presentation.thumbnail_markup,
        escape_url(&term.permalink),
        escape_html(&presentation.title),
        presentation.count_markup,
    )?;

    if !presentation.excerpt_text.is_empty() {
        write!(
            out,
            r#"<span class="term-summary {CLASS_PREFIX}-term-summary">{}</span>"#,
            escape_html(&presentation.excerpt_text)
        )?;
    }
    Ok(())
}
