//! Property mappings, event callbacks, and the property diff.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// An event handler bound to a host node.
///
/// Callbacks are compared by identity, not by behavior: two callbacks are
/// equal exactly when they were cloned from the same `Callback::new` call.
/// The property diff relies on this to decide whether a listener binding
/// changed between generations, mirroring reference equality of handler
/// functions in dynamic hosts.
///
/// The payload is an opaque `&dyn Any` supplied by the host adapter when it
/// dispatches the event; handlers downcast it to the host's event type.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(&dyn Any) + Send + Sync>);

impl Callback {
    /// Wrap a handler function.
    pub fn new(handler: impl Fn(&dyn Any) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    /// Invoke the handler with a host-supplied event payload.
    pub fn call(&self, event: &dyn Any) {
        (self.0)(event)
    }

    /// Returns true if both callbacks originate from the same `new` call.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Event handler; only meaningful under an `on`-prefixed key.
    Handler(Callback),
}

impl PropValue {
    /// Returns the callback if this value is a handler.
    pub fn as_handler(&self) -> Option<&Callback> {
        match self {
            PropValue::Handler(callback) => Some(callback),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Text(s) => write!(f, "{}", s),
            PropValue::Int(i) => write!(f, "{}", i),
            PropValue::Float(v) => write!(f, "{}", v),
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Handler(_) => write!(f, "<callback>"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<Callback> for PropValue {
    fn from(value: Callback) -> Self {
        PropValue::Handler(value)
    }
}

/// An ordered property mapping.
///
/// Keys iterate in a deterministic order, which keeps the diff output stable
/// across runs. Keys beginning with `on` are event-listener bindings; every
/// other key is a plain host property. Children are not part of the mapping
/// (they live on [`Element`](crate::Element) directly), so they can never be
/// misrouted to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a property, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    /// Returns true if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, PropValue)> for Props {
    fn from_iter<T: IntoIterator<Item = (String, PropValue)>>(iter: T) -> Self {
        Props(iter.into_iter().collect())
    }
}

/// Returns true if the property name binds an event listener.
pub fn is_event(name: &str) -> bool {
    name.starts_with("on")
}

/// Host event name for a listener property: the `on` prefix stripped and the
/// remainder lower-cased (`"onInput"` -> `"input"`).
pub fn event_name(name: &str) -> String {
    name[2..].to_ascii_lowercase()
}

/// One host-directed mutation computed by [`diff_props`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropPatch {
    /// Detach a listener that is gone or whose handler identity changed.
    RemoveListener {
        /// Host event name.
        event: String,
        /// The previously attached handler.
        handler: Callback,
    },
    /// Clear a plain property that is no longer present.
    ClearProperty {
        /// Property name.
        name: String,
    },
    /// Set a plain property that is new or whose value changed.
    SetProperty {
        /// Property name.
        name: String,
        /// The new value.
        value: PropValue,
    },
    /// Attach a listener that is new or whose handler identity changed.
    AddListener {
        /// Host event name.
        event: String,
        /// The handler to attach.
        handler: Callback,
    },
}

/// Compute the mutations that turn `old` into `new` on a host node.
///
/// Every key present in either mapping is classified and diffed exactly
/// once, over the explicit ordered union of both key sets. Patches come out
/// in four groups, in application order: removed listeners, cleared
/// properties, set properties, added listeners. Identical values produce no
/// patch, so re-diffing unchanged props yields an empty list.
///
/// Listener keys carrying a non-handler value are ignored; they are never
/// routed to `set_property`.
pub fn diff_props<'a>(old: &'a Props, new: &'a Props) -> Vec<PropPatch> {
    let mut removed = Vec::new();
    let mut cleared = Vec::new();
    let mut set = Vec::new();
    let mut added = Vec::new();

    let keys: BTreeSet<&str> = old.keys().chain(new.keys()).collect();
    for key in keys {
        let old_value = old.get(key);
        let new_value = new.get(key);
        if is_event(key) {
            let old_handler = old_value.and_then(PropValue::as_handler);
            let new_handler = new_value.and_then(PropValue::as_handler);
            let changed = match (old_handler, new_handler) {
                (Some(o), Some(n)) => !o.ptr_eq(n),
                _ => true,
            };
            if !changed {
                continue;
            }
            if let Some(handler) = old_handler {
                removed.push(PropPatch::RemoveListener {
                    event: event_name(key),
                    handler: handler.clone(),
                });
            }
            if let Some(handler) = new_handler {
                added.push(PropPatch::AddListener {
                    event: event_name(key),
                    handler: handler.clone(),
                });
            }
        } else {
            match (old_value, new_value) {
                (Some(_), None) => cleared.push(PropPatch::ClearProperty {
                    name: key.to_string(),
                }),
                (_, Some(value)) if old_value != new_value => set.push(PropPatch::SetProperty {
                    name: key.to_string(),
                    value: value.clone(),
                }),
                _ => {}
            }
        }
    }

    let mut patches = removed;
    patches.append(&mut cleared);
    patches.append(&mut set);
    patches.append(&mut added);
    patches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callback() -> Callback {
        Callback::new(|_| {})
    }

    #[test]
    fn test_callback_identity() {
        let a = callback();
        let b = a.clone();
        let c = callback();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_classification() {
        assert!(is_event("onClick"));
        assert!(is_event("onInput"));
        assert!(!is_event("value"));
        assert!(!is_event("title"));
        assert_eq!(event_name("onClick"), "click");
        assert_eq!(event_name("onInput"), "input");
    }

    #[test]
    fn test_diff_of_identical_props_is_empty() {
        let cb = callback();
        let props = Props::new()
            .with("value", "World")
            .with("onInput", cb.clone());
        assert!(diff_props(&props, &props.clone()).is_empty());
    }

    #[test]
    fn test_diff_sets_new_and_changed_properties() {
        let old = Props::new().with("value", "World").with("title", "t");
        let new = Props::new().with("value", "Foo").with("title", "t");
        assert_eq!(
            diff_props(&old, &new),
            vec![PropPatch::SetProperty {
                name: "value".to_string(),
                value: PropValue::Text("Foo".to_string()),
            }]
        );
    }

    #[test]
    fn test_diff_clears_vanished_properties() {
        let old = Props::new().with("value", "World");
        let new = Props::new();
        assert_eq!(
            diff_props(&old, &new),
            vec![PropPatch::ClearProperty {
                name: "value".to_string(),
            }]
        );
    }

    #[test]
    fn test_changed_handler_is_removed_then_added() {
        let before = callback();
        let after = callback();
        let old = Props::new().with("onClick", before.clone());
        let new = Props::new().with("onClick", after.clone());
        assert_eq!(
            diff_props(&old, &new),
            vec![
                PropPatch::RemoveListener {
                    event: "click".to_string(),
                    handler: before,
                },
                PropPatch::AddListener {
                    event: "click".to_string(),
                    handler: after,
                },
            ]
        );
    }

    #[test]
    fn test_unchanged_handler_produces_no_patch() {
        let cb = callback();
        let old = Props::new().with("onClick", cb.clone());
        let new = Props::new().with("onClick", cb.clone());
        assert!(diff_props(&old, &new).is_empty());
    }

    #[test]
    fn test_patch_groups_come_out_in_application_order() {
        let gone = callback();
        let fresh = callback();
        let old = Props::new()
            .with("onBlur", gone.clone())
            .with("stale", "x")
            .with("value", "a");
        let new = Props::new()
            .with("onFocus", fresh.clone())
            .with("value", "b");
        assert_eq!(
            diff_props(&old, &new),
            vec![
                PropPatch::RemoveListener {
                    event: "blur".to_string(),
                    handler: gone,
                },
                PropPatch::ClearProperty {
                    name: "stale".to_string(),
                },
                PropPatch::SetProperty {
                    name: "value".to_string(),
                    value: PropValue::Text("b".to_string()),
                },
                PropPatch::AddListener {
                    event: "focus".to_string(),
                    handler: fresh,
                },
            ]
        );
    }
}
