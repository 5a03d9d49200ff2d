//! # taxolist_core
//!
//! Rendering pipeline for taxonomy term lists.
//!
//! This crate provides:
//! - The `Term` record and the host-facing `TermSource`/`ThumbnailSource` seams
//! - Per-term presentation (id, classes, thumbnail, excerpt, count)
//! - The `ListRenderer`, which assembles the list markup
//! - The `Widget` chrome and update path
//!
//! Rendering never fails on bad data: missing fields render empty and
//! failing extensions are skipped. Only an output sink can report an error.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use taxolist_config::ConfigurationResolver;
//! use taxolist_core::{ImageSizes, ListRenderer, Term, TermImageSource};
//! use taxolist_hooks::ExtensionRegistry;
//!
//! let registry = ExtensionRegistry::new();
//! let sizes = ImageSizes::new();
//! let raw = json!({ "showCount": 1, "showDesc": 0, "listStyle": "ol" });
//! let config = ConfigurationResolver::from_registry(&registry)
//!     .resolve(raw.as_object().unwrap());
//!
//! let terms = [Term::new(1, "News", "/news").with_count(3)];
//! let html = ListRenderer::new(&registry, &sizes, &TermImageSource).render(&terms, &config);
//!
//! assert!(html.starts_with("<ol"));
//! assert!(html.contains(">3</a>"));
//! ```

mod error;
pub mod images;
mod presentation;
mod query;
mod renderer;
mod term;
mod widget;

pub use error::RenderError;
pub use images::{ImageSize, ImageSizes, TermImageSource, ThumbnailSize, ThumbnailSource};
pub use presentation::{CLASS_PREFIX, Presentation, PresentationResolver, term_dom_id};
pub use query::{DEFAULT_TAXONOMY, StaticTermSource, TermQuery, TermSource};
pub use renderer::ListRenderer;
pub use term::Term;
pub use widget::{DEFAULT_STYLESHEET, WIDGET_ID_KEY, Widget, WidgetChrome};
