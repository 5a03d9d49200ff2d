//! Render command implementation

use std::path::Path;

use miette::Result;
use tracing::info;

use taxolist_config::ConfigurationResolver;
use taxolist_core::{
    ImageSizes, ListRenderer, StaticTermSource, TermImageSource, TermQuery, TermSource, Widget,
};
use taxolist_hooks::ExtensionRegistry;

use crate::input::{read_settings, read_sizes, read_terms};

/// Options of the `render` subcommand.
pub struct RenderArgs<'a> {
    pub settings: &'a Path,
    pub terms: &'a Path,
    pub sizes: Option<&'a Path>,
    pub widget: bool,
    pub instance: &'a str,
    pub preview: bool,
    pub taxonomy: &'a str,
}

pub fn run_render(registry: &ExtensionRegistry, args: &RenderArgs<'_>) -> Result<()> {
    let raw = read_settings(args.settings)?;
    let config = ConfigurationResolver::from_registry(registry).resolve(&raw);

    let sizes = match args.sizes {
        Some(path) => read_sizes(path)?,
        None => ImageSizes::new(),
    };

    let source = StaticTermSource::new(read_terms(args.terms)?);
    let query = TermQuery::from_configuration(&config, args.taxonomy);
    let terms = source.terms(&query);
    info!(
        "Rendering {} term(s) from '{}' ordered by {} {}",
        terms.len(),
        query.taxonomy,
        query.orderby,
        query.order
    );

    let renderer = ListRenderer::new(registry, &sizes, &TermImageSource);
    let html = if args.widget {
        Widget::new(args.instance)
            .with_preview(args.preview)
            .render(&renderer, &terms, &config)
    } else {
        renderer.render(&terms, &config)
    };

    print!("{html}");
    if !html.ends_with('\n') {
        println!();
    }
    Ok(())
}
