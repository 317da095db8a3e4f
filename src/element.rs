//! Immutable element descriptions.

use crate::props::Props;

/// Property name under which a text element stores its payload.
///
/// Text content updates flow through the ordinary property diff: a changed
/// text element produces a single `set_property(node, NODE_VALUE, ..)` call.
pub const NODE_VALUE: &str = "nodeValue";

/// The kind of host node an element describes.
///
/// Host tags are opaque to the engine. No validation is performed here; an
/// unrecognized tag is passed through to the host adapter, which is the
/// natural point to reject it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// A host element, identified by an opaque type tag (e.g. `"div"`).
    Host(String),
    /// A text node.
    Text,
}

impl NodeType {
    /// Returns true for the text sentinel.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeType::Text)
    }
}

/// An immutable description of one desired UI node and its children.
///
/// Elements are plain values: they are built once, consumed by
/// [`Renderer::render`](crate::Renderer::render), and never mutated by the
/// engine. Children are an ordered list; raw strings and primitives convert
/// into text elements via `From`, so subtrees compose without explicit
/// wrapping.
///
/// # Example
///
/// ```ignore
/// use fiber_flow::{Element, Props};
///
/// let tree = Element::new(
///     "div",
///     Props::new(),
///     [
///         Element::new("input", Props::new().with("value", "World"), []),
///         Element::new("h2", Props::new(), ["Hello World".into()]),
///     ],
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    node_type: NodeType,
    props: Props,
    children: Vec<Element>,
}

impl Element {
    /// Create a host element with the given type tag, properties, and
    /// ordered children.
    pub fn new(
        tag: impl Into<String>,
        props: Props,
        children: impl IntoIterator<Item = Element>,
    ) -> Self {
        Self {
            node_type: NodeType::Host(tag.into()),
            props,
            children: children.into_iter().collect(),
        }
    }

    /// Create a text element.
    ///
    /// The content is stored under [`NODE_VALUE`]; text elements have no
    /// children.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Text,
            props: Props::new().with(NODE_VALUE, content.into()),
            children: Vec::new(),
        }
    }

    /// Append one child, auto-wrapping primitives into text elements.
    pub fn with_child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    /// The kind of host node this element describes.
    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// The element's property mapping.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// The element's ordered children.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn into_parts(self) -> (NodeType, Props, Vec<Element>) {
        (self.node_type, self.props, self.children)
    }
}

impl From<&str> for Element {
    fn from(content: &str) -> Self {
        Element::text(content)
    }
}

impl From<String> for Element {
    fn from(content: String) -> Self {
        Element::text(content)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::text(value.to_string())
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::text(value.to_string())
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Element::text(value.to_string())
    }
}
