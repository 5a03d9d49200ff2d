//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// taxolist - Render taxonomy term lists to HTML
#[derive(Parser)]
#[command(name = "taxolist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a term list
    Render {
        /// Settings file (JSON or JSONC object)
        #[arg(short, long)]
        settings: PathBuf,

        /// Terms file (JSON array of term records)
        #[arg(short, long)]
        terms: PathBuf,

        /// Image sizes file (object keyed by size name)
        #[arg(long)]
        sizes: Option<PathBuf>,

        /// Wrap the list in widget chrome and heading
        #[arg(long)]
        widget: bool,

        /// Instance identifier used for widget output
        #[arg(long, default_value = "taxolist-1")]
        instance: String,

        /// Render as a live preview (links the default stylesheet)
        #[arg(long)]
        preview: bool,

        /// Taxonomy to select terms from
        #[arg(long, default_value = taxolist_core::DEFAULT_TAXONOMY)]
        taxonomy: String,
    },

    /// Print the default configuration
    Defaults,

    /// Merge new settings over a stored configuration
    Update {
        /// Stored settings file
        #[arg(long)]
        old: PathBuf,

        /// New settings file
        #[arg(long)]
        new: PathBuf,

        /// Instance identifier to record and track stylesheet usage for
        #[arg(long)]
        instance: Option<String>,
    },
}
