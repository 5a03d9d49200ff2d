//! taxolist CLI
//!
//! Renders taxonomy term lists to HTML from settings and term files.

mod cli;
mod commands;
mod input;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use taxolist_hooks::ExtensionRegistry;

use crate::cli::{Cli, Commands};
use crate::commands::defaults::run_defaults;
use crate::commands::render::{RenderArgs, run_render};
use crate::commands::update::run_update;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // The CLI hosts no extensions; every point passes values through.
    let registry = ExtensionRegistry::new();

    match &cli.command {
        Commands::Render {
            settings,
            terms,
            sizes,
            widget,
            instance,
            preview,
            taxonomy,
        } => run_render(
            &registry,
            &RenderArgs {
                settings,
                terms,
                sizes: sizes.as_deref(),
                widget: *widget,
                instance,
                preview: *preview,
                taxonomy,
            },
        ),
        Commands::Defaults => run_defaults(&registry),
        Commands::Update { old, new, instance } => {
            run_update(&registry, old, new, instance.as_deref())
        }
    }
}
