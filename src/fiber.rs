//! The fiber tree: mutable units of work kept in an arena.

use std::ops::{Index, IndexMut};

use slab::Slab;

use crate::element::{Element, NodeType};
use crate::props::Props;

/// Handle to a fiber slot in the arena.
///
/// Ids are only meaningful for the generation that allocated them; the
/// engine never hands out ids for released fibers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiberId(usize);

/// The host mutation a fiber requires on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTag {
    /// A new host node must be appended under the nearest ancestor node.
    Placement,
    /// The existing host node is reused; only changed properties are applied.
    Update,
    /// The host node must be detached from its ancestor node.
    Deletion,
}

/// One unit of work: a mutable tree node representing one element at one
/// generation, carrying its diff result.
///
/// Links are arena handles rather than owning pointers: `child` and
/// `sibling` form the tree for this generation, `parent` points back up,
/// and `alternate` crosses generations to the fiber that held the same
/// structural position in the previously committed tree.
#[derive(Debug)]
pub(crate) struct Fiber<N> {
    /// Node kind; absent only on the synthetic root fiber.
    pub node_type: Option<NodeType>,
    /// Properties for this generation.
    pub props: Props,
    /// Child elements still to be reconciled; consumed when this fiber is
    /// processed as a unit of work.
    pub children: Vec<Element>,
    /// The host node this fiber owns, once created.
    pub node: Option<N>,
    pub parent: Option<FiberId>,
    pub child: Option<FiberId>,
    pub sibling: Option<FiberId>,
    /// Same structural position in the previously committed generation.
    pub alternate: Option<FiberId>,
    /// Absent on the root fiber; the root itself is never committed.
    pub effect: Option<EffectTag>,
}

impl<N> Fiber<N> {
    /// The synthetic root fiber for a new render generation. It owns the
    /// container node from the start and carries no effect tag.
    pub fn root(container: N, children: Vec<Element>, alternate: Option<FiberId>) -> Self {
        Self {
            node_type: None,
            props: Props::new(),
            children,
            node: Some(container),
            parent: None,
            child: None,
            sibling: None,
            alternate,
            effect: None,
        }
    }
}

/// Arena owning every live fiber across both generations.
#[derive(Debug)]
pub(crate) struct FiberArena<N> {
    slab: Slab<Fiber<N>>,
}

impl<N> FiberArena<N> {
    pub fn new() -> Self {
        Self { slab: Slab::new() }
    }

    pub fn insert(&mut self, fiber: Fiber<N>) -> FiberId {
        FiberId(self.slab.insert(fiber))
    }

    /// Number of live fibers.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Next unit of work after `id`, in the fixed traversal order: the
    /// fiber's first child; otherwise the sibling of the first
    /// ancestor-or-self that has one; otherwise none (tree building is
    /// complete).
    pub fn next_unit(&self, id: FiberId) -> Option<FiberId> {
        if let Some(child) = self[id].child {
            return Some(child);
        }
        let mut current = Some(id);
        while let Some(fiber) = current {
            if let Some(sibling) = self[fiber].sibling {
                return Some(sibling);
            }
            current = self[fiber].parent;
        }
        None
    }

    /// Release `root` and every fiber reachable through its `child` and
    /// `sibling` links, excluding `root`'s own sibling chain.
    ///
    /// `alternate` links are never followed: they point into the other
    /// generation, which stays alive.
    pub fn release_tree(&mut self, root: FiberId) {
        let mut stack = Vec::new();
        let first = self.slab.remove(root.0);
        if let Some(child) = first.child {
            stack.push(child);
        }
        while let Some(id) = stack.pop() {
            let fiber = self.slab.remove(id.0);
            if let Some(child) = fiber.child {
                stack.push(child);
            }
            if let Some(sibling) = fiber.sibling {
                stack.push(sibling);
            }
        }
    }
}

impl<N> Index<FiberId> for FiberArena<N> {
    type Output = Fiber<N>;

    fn index(&self, id: FiberId) -> &Fiber<N> {
        &self.slab[id.0]
    }
}

impl<N> IndexMut<FiberId> for FiberArena<N> {
    fn index_mut(&mut self, id: FiberId) -> &mut Fiber<N> {
        &mut self.slab[id.0]
    }
}
