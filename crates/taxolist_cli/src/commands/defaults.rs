//! Defaults command implementation

use miette::{IntoDiagnostic, Result};

use taxolist_config::ConfigurationResolver;
use taxolist_hooks::ExtensionRegistry;

pub fn run_defaults(registry: &ExtensionRegistry) -> Result<()> {
    let resolver = ConfigurationResolver::from_registry(registry);
    let json = serde_json::to_string_pretty(resolver.defaults()).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
