//! Extension registry.
//!
//! The registry is built during an initialization phase and then shared
//! read-only with renderers: registration takes `&mut self`, invocation takes
//! `&self`, so a registry that is being rendered from cannot be mutated at the
//! same time. No locking is attempted.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{trace, warn};

use crate::HookError;

/// Priority used when a caller has no ordering preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Handle returned by registration, usable to remove the callback again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Contextual arguments handed to every callback alongside the value.
///
/// All fields are optional; each point documents which ones it fills.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookArgs<'a> {
    /// The resolved configuration of the instance being rendered.
    pub instance: Option<&'a Value>,
    /// The term currently being rendered.
    pub term: Option<&'a Value>,
    /// Every term of the current render pass.
    pub terms: Option<&'a Value>,
    /// The previous state, for update points.
    pub previous: Option<&'a Value>,
}

impl<'a> HookArgs<'a> {
    /// Creates empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(mut self, instance: &'a Value) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn with_term(mut self, term: &'a Value) -> Self {
        self.term = Some(term);
        self
    }

    pub fn with_terms(mut self, terms: &'a Value) -> Self {
        self.terms = Some(terms);
        self
    }

    pub fn with_previous(mut self, previous: &'a Value) -> Self {
        self.previous = Some(previous);
        self
    }
}

/// A filter callback: receives the current value and returns the next one.
pub type FilterFn = dyn Fn(Value, &HookArgs<'_>) -> Result<Value, HookError> + Send + Sync;

/// An action callback: runs for its side effects only.
pub type ActionFn = dyn Fn(&HookArgs<'_>) -> Result<(), HookError> + Send + Sync;

struct Registered<F: ?Sized> {
    id: HookId,
    priority: i32,
    callback: Box<F>,
}

/// Inserts keeping ascending priority, after any entry of equal priority.
fn insert_ordered<F: ?Sized>(list: &mut Vec<Registered<F>>, entry: Registered<F>) {
    let pos = list.partition_point(|h| h.priority <= entry.priority);
    list.insert(pos, entry);
}

/// Runs a callback, turning a panic into an error.
fn run_guarded<T>(f: impl FnOnce() -> Result<T, HookError>) -> Result<T, HookError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(HookError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Registry of named extension points.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use taxolist_hooks::{ExtensionRegistry, FilterPoint, HookArgs};
///
/// let mut registry = ExtensionRegistry::new();
/// registry.register(FilterPoint::ItemTitle, 10, |value, _args| {
///     Ok(Value::String(format!("{} »", value.as_str().unwrap_or_default())))
/// });
///
/// let title = registry.invoke_str(FilterPoint::ItemTitle, "News".to_string(), &HookArgs::new());
/// assert_eq!(title, "News »");
/// ```
#[derive(Default)]
pub struct ExtensionRegistry {
    filters: HashMap<String, Vec<Registered<FilterFn>>>,
    actions: HashMap<String, Vec<Registered<ActionFn>>>,
    next_id: u64,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: HashMap<&str, usize> = self
            .filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        let actions: HashMap<&str, usize> = self
            .actions
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        f.debug_struct("ExtensionRegistry")
            .field("filters", &filters)
            .field("actions", &actions)
            .finish()
    }
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> HookId {
        self.next_id += 1;
        HookId(self.next_id)
    }

    /// Registers a filter callback on `point`.
    ///
    /// Callbacks run in ascending `priority`; equal priorities run in
    /// registration order.
    pub fn register<F>(&mut self, point: impl AsRef<str>, priority: i32, callback: F) -> HookId
    where
        F: Fn(Value, &HookArgs<'_>) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        let id = self.next_id();
        let list = self.filters.entry(point.as_ref().to_string()).or_default();
        insert_ordered(
            list,
            Registered {
                id,
                priority,
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Registers an action callback on `point`.
    pub fn register_action<F>(
        &mut self,
        point: impl AsRef<str>,
        priority: i32,
        callback: F,
    ) -> HookId
    where
        F: Fn(&HookArgs<'_>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        let id = self.next_id();
        let list = self.actions.entry(point.as_ref().to_string()).or_default();
        insert_ordered(
            list,
            Registered {
                id,
                priority,
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Removes a previously registered filter or action.
    ///
    /// Returns `false` when the id is unknown.
    pub fn remove(&mut self, id: HookId) -> bool {
        for list in self.filters.values_mut() {
            if let Some(pos) = list.iter().position(|h| h.id == id) {
                list.remove(pos);
                return true;
            }
        }
        for list in self.actions.values_mut() {
            if let Some(pos) = list.iter().position(|h| h.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Returns whether any filter is registered on `point`.
    pub fn has_filter(&self, point: impl AsRef<str>) -> bool {
        self.filters
            .get(point.as_ref())
            .is_some_and(|list| !list.is_empty())
    }

    /// Returns whether any action is registered on `point`.
    pub fn has_action(&self, point: impl AsRef<str>) -> bool {
        self.actions
            .get(point.as_ref())
            .is_some_and(|list| !list.is_empty())
    }

    /// Runs the filter pipeline of `point` over `value`.
    ///
    /// Each callback receives the previous callback's result. A callback that
    /// fails or panics is logged and skipped, so the next callback sees the
    /// value from before the failure.
    pub fn invoke(&self, point: impl AsRef<str>, value: Value, args: &HookArgs<'_>) -> Value {
        let point = point.as_ref();
        let Some(hooks) = self.filters.get(point) else {
            return value;
        };

        let mut current = value;
        for hook in hooks {
            trace!("Applying filter {} on '{}'", hook.id, point);
            match run_guarded(|| (hook.callback)(current.clone(), args)) {
                Ok(next) => current = next,
                Err(e) => warn!("Filter {} on '{}' failed: {}", hook.id, point, e),
            }
        }
        current
    }

    /// Runs the filter pipeline of `point` over a string.
    ///
    /// Scalar results are converted to strings; structured results are
    /// rejected and the input is kept.
    pub fn invoke_str(&self, point: impl AsRef<str>, value: String, args: &HookArgs<'_>) -> String {
        let point = point.as_ref();
        if !self.has_filter(point) {
            return value;
        }

        let result = self.invoke(point, Value::String(value.clone()), args);
        match value_to_string(&result) {
            Some(s) => s,
            None => {
                warn!("{}", HookError::unexpected(point, "a string"));
                value
            }
        }
    }

    /// Runs the filter pipeline of `point` over a list of strings.
    ///
    /// A scalar result is treated as a one-element list and `null` as an
    /// empty one.
    pub fn invoke_list(
        &self,
        point: impl AsRef<str>,
        value: Vec<String>,
        args: &HookArgs<'_>,
    ) -> Vec<String> {
        let point = point.as_ref();
        if !self.has_filter(point) {
            return value;
        }

        let input = Value::Array(value.iter().cloned().map(Value::String).collect());
        let result = self.invoke(point, input, args);
        value_to_list(&result)
    }

    /// Runs the filter pipeline of `point` over any serializable value.
    ///
    /// When the pipeline output no longer deserializes into `T`, the input is
    /// kept.
    pub fn invoke_as<T>(&self, point: impl AsRef<str>, value: T, args: &HookArgs<'_>) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let point = point.as_ref();
        if !self.has_filter(point) {
            return value;
        }

        let input = match serde_json::to_value(&value) {
            Ok(v) => v,
            Err(e) => {
                warn!("Cannot pass value to '{}': {}", point, e);
                return value;
            }
        };

        let result = self.invoke(point, input, args);
        match serde_json::from_value(result) {
            Ok(v) => v,
            Err(e) => {
                warn!("{}", HookError::from(e));
                value
            }
        }
    }

    /// Runs every action registered on `point`.
    pub fn notify(&self, point: impl AsRef<str>, args: &HookArgs<'_>) {
        let point = point.as_ref();
        let Some(hooks) = self.actions.get(point) else {
            return;
        };

        for hook in hooks {
            trace!("Running action {} on '{}'", hook.id, point);
            if let Err(e) = run_guarded(|| (hook.callback)(args)) {
                warn!("Action {} on '{}' failed: {}", hook.id, point, e);
            }
        }
    }
}

/// Converts a scalar JSON value to its string form.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Converts a JSON value to a list of strings.
fn value_to_list(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
        Value::Object(map) => map.values().filter_map(value_to_string).collect(),
        scalar => value_to_string(scalar).into_iter().collect(),
    }
}
