//! Shared recording host for integration tests.
//!
//! `MockHost` materializes a real node tree (so tests can assert the final
//! shape) and logs every mutation in call order (so tests can assert what
//! the engine did, and in which order).
#![allow(dead_code)]

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use fiber_flow::{Callback, HostAdapter, HostError, PropValue, RenderError};

pub type NodeId = usize;

/// One host mutation, in the order the engine issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateNode { node: NodeId, node_type: String },
    CreateTextNode { node: NodeId },
    SetProperty { node: NodeId, name: String, value: String },
    RemoveProperty { node: NodeId, name: String },
    AddListener { node: NodeId, event: String },
    RemoveListener { node: NodeId, event: String },
    AppendChild { parent: NodeId, child: NodeId },
    RemoveChild { parent: NodeId, child: NodeId },
}

#[derive(Debug, Default)]
pub struct MockNode {
    /// `None` for text nodes.
    pub node_type: Option<String>,
    pub props: BTreeMap<String, String>,
    pub listeners: BTreeMap<String, Callback>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct MockHost {
    pub nodes: Vec<MockNode>,
    pub log: Vec<Mutation>,
    rejected_types: BTreeSet<String>,
}

impl MockHost {
    pub const CONTAINER: NodeId = 0;

    /// A host with an empty container node pre-allocated as node 0.
    pub fn new() -> Self {
        Self {
            nodes: vec![MockNode {
                node_type: Some("container".to_string()),
                ..MockNode::default()
            }],
            log: Vec::new(),
            rejected_types: BTreeSet::new(),
        }
    }

    /// A host that fails fast on the given node type.
    pub fn rejecting(node_type: &str) -> Self {
        let mut host = Self::new();
        host.rejected_types.insert(node_type.to_string());
        host
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn node_type(&self, id: NodeId) -> Option<&str> {
        self.nodes[id].node_type.as_deref()
    }

    pub fn prop(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id].props.get(name).map(String::as_str)
    }

    pub fn listener_events(&self, id: NodeId) -> Vec<&str> {
        self.nodes[id].listeners.keys().map(String::as_str).collect()
    }

    /// Invoke the listener attached to `node` for `event`.
    pub fn dispatch(&self, node: NodeId, event: &str, payload: &dyn Any) {
        if let Some(handler) = self.nodes[node].listeners.get(event) {
            handler.call(payload);
        }
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn creations(&self) -> usize {
        self.log
            .iter()
            .filter(|m| matches!(m, Mutation::CreateNode { .. } | Mutation::CreateTextNode { .. }))
            .count()
    }

    pub fn element_creations(&self) -> usize {
        self.log
            .iter()
            .filter(|m| matches!(m, Mutation::CreateNode { .. }))
            .count()
    }

    pub fn appends(&self) -> usize {
        self.log
            .iter()
            .filter(|m| matches!(m, Mutation::AppendChild { .. }))
            .count()
    }

    pub fn removals(&self) -> usize {
        self.log
            .iter()
            .filter(|m| matches!(m, Mutation::RemoveChild { .. }))
            .count()
    }

    fn alloc(&mut self, node_type: Option<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(MockNode {
            node_type,
            ..MockNode::default()
        });
        id
    }
}

impl HostAdapter for MockHost {
    type Node = NodeId;

    fn create_node(&mut self, node_type: &str) -> Result<Self::Node, RenderError> {
        if self.rejected_types.contains(node_type) {
            return Err(HostError::UnrecognizedType(node_type.to_string()).into());
        }
        let node = self.alloc(Some(node_type.to_string()));
        self.log.push(Mutation::CreateNode {
            node,
            node_type: node_type.to_string(),
        });
        Ok(node)
    }

    fn create_text_node(&mut self) -> Result<Self::Node, RenderError> {
        let node = self.alloc(None);
        self.log.push(Mutation::CreateTextNode { node });
        Ok(node)
    }

    fn set_property(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &PropValue,
    ) -> Result<(), RenderError> {
        self.nodes[*node]
            .props
            .insert(name.to_string(), value.to_string());
        self.log.push(Mutation::SetProperty {
            node: *node,
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn remove_property(&mut self, node: &Self::Node, name: &str) -> Result<(), RenderError> {
        self.nodes[*node].props.remove(name);
        self.log.push(Mutation::RemoveProperty {
            node: *node,
            name: name.to_string(),
        });
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &Callback,
    ) -> Result<(), RenderError> {
        self.nodes[*node]
            .listeners
            .insert(event.to_string(), handler.clone());
        self.log.push(Mutation::AddListener {
            node: *node,
            event: event.to_string(),
        });
        Ok(())
    }

    fn remove_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        _handler: &Callback,
    ) -> Result<(), RenderError> {
        self.nodes[*node].listeners.remove(event);
        self.log.push(Mutation::RemoveListener {
            node: *node,
            event: event.to_string(),
        });
        Ok(())
    }

    fn append_child(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), RenderError> {
        // Move semantics, like a real document tree.
        self.nodes[*parent].children.retain(|c| c != child);
        self.nodes[*parent].children.push(*child);
        self.log.push(Mutation::AppendChild {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }

    fn remove_child(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), RenderError> {
        if !self.nodes[*parent].children.contains(child) {
            return Err(HostError::DetachedNode.into());
        }
        self.nodes[*parent].children.retain(|c| c != child);
        self.log.push(Mutation::RemoveChild {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }
}
