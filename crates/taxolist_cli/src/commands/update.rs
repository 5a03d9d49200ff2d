//! Update command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use taxolist_config::{ConfigurationResolver, InMemoryStylesheetUsage, StylesheetUsage};
use taxolist_core::Widget;
use taxolist_hooks::ExtensionRegistry;

use crate::input::read_settings;

pub fn run_update(
    registry: &ExtensionRegistry,
    old: &Path,
    new: &Path,
    instance: Option<&str>,
) -> Result<()> {
    let resolver = ConfigurationResolver::from_registry(registry);
    let stored = resolver.resolve(&read_settings(old)?);
    let update = read_settings(new)?;

    let config = match instance {
        Some(id) => {
            let mut usage = InMemoryStylesheetUsage::new();
            if stored.css_default {
                usage.add(id);
            }
            let config = Widget::new(id).update(registry, &resolver, &mut usage, &update, &stored);
            info!(
                "Instances using the default stylesheet: {}",
                usage.iter().collect::<Vec<_>>().join(", ")
            );
            config
        }
        None => resolver.resolve_update_with(registry, &update, &stored),
    };

    let json = serde_json::to_string_pretty(&config).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
