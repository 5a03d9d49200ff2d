//! # taxolist_hooks
//!
//! Extension points for the taxolist renderer.
//!
//! This crate provides:
//! - The `ExtensionRegistry`, a set of named pipelines
//! - Filter points, which transform a value through ordered callbacks
//! - Action points, which notify callbacks without consuming a result
//!
//! ## Failure model
//!
//! Extensions are untrusted with respect to rendering: a callback that
//! returns an error or panics is logged and skipped, and the pipeline
//! continues with the value it had before that callback.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use taxolist_hooks::{ExtensionRegistry, HookArgs};
//!
//! let mut registry = ExtensionRegistry::new();
//! registry.register("listClassList", 10, |mut classes, _| {
//!     if let Some(list) = classes.as_array_mut() {
//!         list.push(json!("featured"));
//!     }
//!     Ok(classes)
//! });
//!
//! let classes = registry.invoke_list("listClassList", vec!["base".into()], &HookArgs::new());
//! assert_eq!(classes, vec!["base", "featured"]);
//! ```

mod error;
mod point;
mod registry;

pub use error::HookError;
pub use point::{ActionPoint, FilterPoint, UnknownPoint};
pub use registry::{ActionFn, DEFAULT_PRIORITY, ExtensionRegistry, FilterFn, HookArgs, HookId};
