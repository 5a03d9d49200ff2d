//! Subcommand implementations

pub mod defaults;
pub mod render;
pub mod update;
