//! The host adapter boundary.

use crate::error::RenderError;
use crate::props::{Callback, PropValue};

/// Creates and mutates real nodes in the embedding environment's tree.
///
/// The engine never touches host state directly: every mutation computed by
/// reconciliation and commit flows through this trait. Handles are whatever
/// the host finds cheap to clone (an index, an `Rc`, a foreign reference).
///
/// # Contract
///
/// - `create_node` receives the element's opaque type tag unvalidated; an
///   adapter that cannot represent the tag should fail fast (see
///   [`HostError::UnrecognizedType`]) rather than produce a placeholder.
/// - `create_text_node` creates an empty text node; the engine immediately
///   sets its content through `set_property` with
///   [`NODE_VALUE`](crate::NODE_VALUE).
/// - Listener handlers are compared by the engine before calls are issued:
///   an adapter only ever sees remove/add pairs for bindings that actually
///   changed.
/// - All methods are expected to succeed; any error aborts the render
///   generation in progress (no retries).
///
/// # Example
///
/// ```ignore
/// use fiber_flow::{Callback, HostAdapter, HostError, PropValue, RenderError};
///
/// struct Dom;
///
/// impl HostAdapter for Dom {
///     type Node = web_sys::Node;
///
///     fn create_node(&mut self, node_type: &str) -> Result<Self::Node, RenderError> {
///         document()
///             .create_element(node_type)
///             .map(Into::into)
///             .map_err(|_| HostError::UnrecognizedType(node_type.to_string()).into())
///     }
///     // ...
/// }
/// ```
pub trait HostAdapter {
    /// Handle to one host node.
    type Node: Clone;

    /// Create a host element node for an opaque type tag.
    fn create_node(&mut self, node_type: &str) -> Result<Self::Node, RenderError>;

    /// Create an empty text node.
    fn create_text_node(&mut self) -> Result<Self::Node, RenderError>;

    /// Set a plain property to a new value.
    fn set_property(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &PropValue,
    ) -> Result<(), RenderError>;

    /// Clear a property that is no longer present.
    fn remove_property(&mut self, node: &Self::Node, name: &str) -> Result<(), RenderError>;

    /// Attach an event listener. `event` is the lower-cased name with the
    /// `on` prefix already stripped.
    fn add_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &Callback,
    ) -> Result<(), RenderError>;

    /// Detach a previously attached event listener.
    fn remove_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &Callback,
    ) -> Result<(), RenderError>;

    /// Append `child` as the last child of `parent`.
    fn append_child(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), RenderError>;

    /// Detach `child` from `parent`.
    fn remove_child(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), RenderError>;
}

/// Ready-made rejection reasons for host adapter implementations.
///
/// The reconciler performs no input validation; the adapter is the boundary
/// where malformed elements fail fast. Adapters are free to return their own
/// error types instead, since anything convertible to `anyhow::Error`
/// propagates through [`RenderError`], but these cover the common cases and
/// stay downcastable on the far side via [`RenderError::downcast_ref`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The element's type tag names no node kind this host can create.
    #[error("unrecognized node type: {0:?}")]
    UnrecognizedType(String),

    /// A property value is incompatible with the node it targets.
    #[error("property {name:?} is not valid for this node")]
    InvalidProperty {
        /// The offending property name.
        name: String,
    },

    /// The node handle no longer refers to a live host node.
    #[error("node is no longer attached to the host tree")]
    DetachedNode,
}
