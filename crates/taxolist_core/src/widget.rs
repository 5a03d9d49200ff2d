//! Widget chrome around a rendered list, and the instance update path.

use std::fmt::Write;

use serde_json::{Map, Value};
use tracing::{info, warn};

use taxolist_config::{
    Configuration, ConfigurationResolver, StylesheetUsage, sync_stylesheet,
};
use taxolist_hooks::{ActionPoint, ExtensionRegistry, FilterPoint, HookArgs};
use taxolist_text::{escape_html, escape_url};

use crate::error::RenderError;
use crate::presentation::CLASS_PREFIX;
use crate::{ListRenderer, Term};

/// Stylesheet linked in preview mode when no other URL is configured.
pub const DEFAULT_STYLESHEET: &str = "css/front.css";

/// Key under which [`Widget::update`] records the instance identifier.
pub const WIDGET_ID_KEY: &str = "widgetId";

const COLOPHON: &str = "<!-- taxolist term list -->";

/// Markup the host's sidebar places around every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChrome {
    pub before_widget: String,
    pub after_widget: String,
    pub before_title: String,
    pub after_title: String,
}

impl Default for WidgetChrome {
    fn default() -> Self {
        Self {
            before_widget: format!(r#"<section class="widget {CLASS_PREFIX}-widget">"#),
            after_widget: "</section>".to_string(),
            before_title: r#"<h2 class="widget-title">"#.to_string(),
            after_title: "</h2>".to_string(),
        }
    }
}

/// One placed instance of the term list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub instance_id: String,
    pub chrome: WidgetChrome,
    /// Whether the host is rendering a live preview of unsaved settings.
    pub preview: bool,
    pub stylesheet_url: String,
}

impl Widget {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            chrome: WidgetChrome::default(),
            preview: false,
            stylesheet_url: DEFAULT_STYLESHEET.to_string(),
        }
    }

    pub fn with_chrome(mut self, chrome: WidgetChrome) -> Self {
        self.chrome = chrome;
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_stylesheet_url(mut self, url: impl Into<String>) -> Self {
        self.stylesheet_url = url.into();
        self
    }

    /// Renders the full widget: chrome, heading, wrapper and list.
    pub fn render(&self, renderer: &ListRenderer<'_>, terms: &[Term], config: &Configuration) -> String {
        let mut out = String::new();
        if let Err(e) = self.render_to(&mut out, renderer, terms, config) {
            warn!("Widget '{}' failed to render: {}", self.instance_id, e);
        }
        out
    }

    /// Streams the full widget into `out`.
    ///
    /// The heading is omitted when the filtered title is empty. In preview
    /// mode with `cssDefault` on, a `<link>` to the stylesheet is emitted,
    /// since the host only enqueues it for saved instances.
    pub fn render_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        renderer: &ListRenderer<'_>,
        terms: &[Term],
        config: &Configuration,
    ) -> Result<(), RenderError> {
        let registry = renderer.registry();
        let instance = config.to_value();
        let args = HookArgs::new().with_instance(&instance);

        out.write_str(&self.chrome.before_widget)?;

        let title = registry.invoke_str(FilterPoint::WidgetTitle, config.title.clone(), &args);
        if !title.is_empty() {
            write!(
                out,
                "{}{}{}",
                self.chrome.before_title,
                escape_html(&title),
                self.chrome.after_title
            )?;
        }
        registry.notify(ActionPoint::TitleAfter, &args);

        if config.css_default && self.preview {
            write!(
                out,
                r#"<link rel="stylesheet" href="{}" type="text/css" media="all" />"#,
                escape_url(&self.stylesheet_url)
            )?;
        }

        writeln!(
            out,
            r#"<div class="{CLASS_PREFIX}-widget {CLASS_PREFIX}-categories-wrap">"#
        )?;
        registry.notify(ActionPoint::ListBefore, &args);
        renderer.render_to(out, terms, config)?;
        registry.notify(ActionPoint::ListAfter, &args);
        writeln!(out, "</div>")?;

        out.write_str(COLOPHON)?;
        out.write_str(&self.chrome.after_widget)?;
        Ok(())
    }

    /// Applies a settings update to this instance.
    ///
    /// The instance id is recorded under [`WIDGET_ID_KEY`] before the
    /// resolver's update path runs, so the `instanceUpdate` filter and the
    /// `instanceUpdated` action both see it. Afterwards the stylesheet usage
    /// set is brought in step with `cssDefault`.
    pub fn update(
        &self,
        registry: &ExtensionRegistry,
        resolver: &ConfigurationResolver,
        usage: &mut dyn StylesheetUsage,
        new: &Map<String, Value>,
        old: &Configuration,
    ) -> Configuration {
        let mut update = new.clone();
        update.insert(
            WIDGET_ID_KEY.to_string(),
            Value::String(self.instance_id.clone()),
        );
        let config = resolver.resolve_update_with(registry, &update, old);

        let change = sync_stylesheet(usage, &self.instance_id, &config);
        info!("Updated instance '{}' (stylesheet: {:?})", self.instance_id, change);
        config
    }
}
