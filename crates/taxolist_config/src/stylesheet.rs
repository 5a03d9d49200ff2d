//! Tracking of instances that use the default stylesheet.

use std::collections::BTreeSet;

use tracing::debug;

use crate::Configuration;

/// Set of instance identifiers whose configuration asks for the default
/// stylesheet.
///
/// The host owns the storage and reads it when deciding whether to enqueue
/// the stylesheet.
pub trait StylesheetUsage {
    fn add(&mut self, instance_id: &str);
    fn remove(&mut self, instance_id: &str);
    fn contains(&self, instance_id: &str) -> bool;
}

/// In-memory [`StylesheetUsage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStylesheetUsage {
    instances: BTreeSet<String>,
}

impl InMemoryStylesheetUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.instances.iter().map(String::as_str)
    }
}

impl StylesheetUsage for InMemoryStylesheetUsage {
    fn add(&mut self, instance_id: &str) {
        self.instances.insert(instance_id.to_string());
    }

    fn remove(&mut self, instance_id: &str) {
        self.instances.remove(instance_id);
    }

    fn contains(&self, instance_id: &str) -> bool {
        self.instances.contains(instance_id)
    }
}

/// What [`sync_stylesheet`] did to the usage set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetChange {
    Added,
    Removed,
    Unchanged,
}

/// Brings the usage set in line with `config.css_default` for one instance.
pub fn sync_stylesheet(
    usage: &mut dyn StylesheetUsage,
    instance_id: &str,
    config: &Configuration,
) -> StylesheetChange {
    let listed = usage.contains(instance_id);
    match (config.css_default, listed) {
        (true, false) => {
            usage.add(instance_id);
            debug!("Instance '{}' now uses the default stylesheet", instance_id);
            StylesheetChange::Added
        }
        (false, true) => {
            usage.remove(instance_id);
            debug!("Instance '{}' no longer uses the default stylesheet", instance_id);
            StylesheetChange::Removed
        }
        _ => StylesheetChange::Unchanged,
    }
}
