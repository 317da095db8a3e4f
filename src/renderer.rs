//! Render state, the cooperative work loop, and the commit phase.

use std::sync::Arc;

use crate::element::{Element, NodeType};
use crate::error::RenderError;
use crate::fiber::{EffectTag, Fiber, FiberArena, FiberId};
use crate::host::HostAdapter;
use crate::props::{diff_props, PropPatch, Props};
use crate::reconcile::reconcile_children;
use crate::scheduler::Deadline;
use crate::tracer::{NoopTracer, Tracer};

/// Outcome of one [`Renderer::work`] turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkStatus {
    /// No work remains. If a generation just finished building, it has been
    /// committed in this turn.
    Idle,
    /// The deadline expired with work remaining; call `work` again with a
    /// fresh deadline to resume from the same continuation.
    Yielded,
}

/// The rendering engine: owns the host adapter and all render state.
///
/// One renderer drives one root container. All four pieces of render state
/// (`current` tree, work-in-progress tree, continuation, pending deletions)
/// live here rather than in module globals, which makes the single
/// render-in-flight invariant explicit: starting a new render discards any
/// prior uncommitted generation.
///
/// # Example
///
/// ```ignore
/// use fiber_flow::{Element, NeverYield, Props, Renderer, TimeSlice, WorkStatus};
///
/// let mut renderer = Renderer::new(host, container);
/// renderer.render(Element::new("div", Props::new(), ["Hello World".into()]));
///
/// // Cooperative driving: one slice per idle callback.
/// while let WorkStatus::Yielded = renderer.work(&TimeSlice::new(budget))? {
///     // yield back to the host scheduler
/// }
/// ```
pub struct Renderer<H: HostAdapter> {
    host: H,
    container: H::Node,
    arena: FiberArena<H::Node>,
    current_root: Option<FiberId>,
    wip_root: Option<FiberId>,
    next_unit: Option<FiberId>,
    deletions: Vec<FiberId>,
    tracer: Arc<dyn Tracer>,
}

impl<H: HostAdapter> Renderer<H> {
    /// Bind a host adapter and the root container node.
    pub fn new(host: H, container: H::Node) -> Self {
        Self::with_tracer(host, container, NoopTracer)
    }

    /// Like [`new`](Renderer::new), with a tracer observing execution.
    pub fn with_tracer(host: H, container: H::Node, tracer: impl Tracer) -> Self {
        Self {
            host,
            container,
            arena: FiberArena::new(),
            current_root: None,
            wip_root: None,
            next_unit: None,
            deletions: Vec::new(),
            tracer: Arc::new(tracer),
        }
    }

    /// The host adapter.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host adapter, e.g. for event dispatch.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// True when no render is in flight.
    pub fn is_idle(&self) -> bool {
        self.wip_root.is_none() && self.next_unit.is_none()
    }

    /// Start a new render generation for `element` under the container.
    ///
    /// Any prior uncommitted generation is discarded: its partially built
    /// fibers are released and its collected deletions are untagged. The
    /// last committed tree is unaffected either way; work begins on the next
    /// [`work`](Renderer::work) call.
    pub fn render(&mut self, element: Element) {
        self.reset_in_progress();
        let root = self.arena.insert(Fiber::root(
            self.container.clone(),
            vec![element],
            self.current_root,
        ));
        self.wip_root = Some(root);
        self.next_unit = Some(root);
        self.tracer.on_render_scheduled();
    }

    /// Run the work loop for one scheduling slice.
    ///
    /// Processes one fiber at a time, polling the deadline after each unit
    /// (so every turn makes progress of at least one unit). When the
    /// deadline expires with work remaining, returns
    /// [`WorkStatus::Yielded`] with the continuation intact. When
    /// tree-building completes, the commit phase runs exactly once,
    /// synchronously, within the same turn (deletions first, then
    /// placements and updates in traversal order) and the finished tree
    /// becomes the new baseline.
    ///
    /// A host adapter failure aborts the generation: in-progress state is
    /// reset so the next [`render`](Renderer::render) starts cleanly, and
    /// the error is returned.
    pub fn work(&mut self, deadline: &impl Deadline) -> Result<WorkStatus, RenderError> {
        while let Some(unit) = self.next_unit {
            match self.perform_unit(unit) {
                Ok(next) => self.next_unit = next,
                Err(e) => {
                    self.reset_in_progress();
                    return Err(e);
                }
            }
            self.tracer.on_unit_performed(unit);
            if self.next_unit.is_some() && deadline.should_yield() {
                self.tracer.on_yielded();
                return Ok(WorkStatus::Yielded);
            }
        }
        if self.wip_root.is_some() {
            if let Err(e) = self.commit_root() {
                self.reset_in_progress();
                return Err(e);
            }
        }
        Ok(WorkStatus::Idle)
    }

    /// Drive the current render to completion, commit included.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        while let WorkStatus::Yielded = self.work(&crate::scheduler::NeverYield)? {}
        Ok(())
    }

    /// Process one fiber: ensure its host node exists (created on first
    /// visit only), reconcile its children, and return the next unit in
    /// traversal order.
    fn perform_unit(&mut self, id: FiberId) -> Result<Option<FiberId>, RenderError> {
        if self.arena[id].node.is_none() {
            let node = self.create_node_for(id)?;
            self.arena[id].node = Some(node);
        }
        let elements = std::mem::take(&mut self.arena[id].children);
        reconcile_children(&mut self.arena, &mut self.deletions, id, elements);
        Ok(self.arena.next_unit(id))
    }

    /// Create the host node for a fiber and seed it with the fiber's props,
    /// diffed against an empty baseline.
    fn create_node_for(&mut self, id: FiberId) -> Result<H::Node, RenderError> {
        let node = match self.arena[id].node_type.clone() {
            Some(NodeType::Text) => self.host.create_text_node()?,
            Some(NodeType::Host(tag)) => self.host.create_node(&tag)?,
            // The synthetic root is created with the container node already
            // attached, so it never reaches node creation.
            None => unreachable!("root fiber owns the container node"),
        };
        let props = self.arena[id].props.clone();
        for patch in diff_props(&Props::new(), &props) {
            Self::apply_patch(&mut self.host, &node, patch)?;
        }
        Ok(node)
    }

    fn apply_patch(host: &mut H, node: &H::Node, patch: PropPatch) -> Result<(), RenderError> {
        match patch {
            PropPatch::RemoveListener { event, handler } => {
                host.remove_event_listener(node, &event, &handler)
            }
            PropPatch::ClearProperty { name } => host.remove_property(node, &name),
            PropPatch::SetProperty { name, value } => host.set_property(node, &name, &value),
            PropPatch::AddListener { event, handler } => {
                host.add_event_listener(node, &event, &handler)
            }
        }
    }

    /// Apply the finished generation to the host, then promote it.
    ///
    /// Deletions are detached first, then a depth-first walk from the root's
    /// child applies placements and updates, child before sibling. The walk
    /// severs `alternate` links as it goes; afterwards the superseded
    /// generation is released from the arena. Commit is not interruptible.
    fn commit_root(&mut self) -> Result<(), RenderError> {
        let Some(wip) = self.wip_root else {
            return Ok(());
        };
        self.tracer.on_commit_started();

        for id in std::mem::take(&mut self.deletions) {
            self.commit_deletion(id)?;
        }

        let mut stack = Vec::new();
        if let Some(child) = self.arena[wip].child {
            stack.push(child);
        }
        while let Some(id) = stack.pop() {
            self.commit_effect(id)?;
            self.arena[id].alternate = None;
            let fiber = &self.arena[id];
            let (child, sibling) = (fiber.child, fiber.sibling);
            if let Some(s) = sibling {
                stack.push(s);
            }
            if let Some(c) = child {
                stack.push(c);
            }
        }

        self.arena[wip].alternate = None;
        if let Some(old_root) = self.current_root.take() {
            self.arena.release_tree(old_root);
        }
        self.current_root = Some(wip);
        self.wip_root = None;
        self.next_unit = None;
        self.tracer.on_commit_finished();
        Ok(())
    }

    fn commit_effect(&mut self, id: FiberId) -> Result<(), RenderError> {
        match self.arena[id].effect {
            Some(EffectTag::Placement) => {
                if let Some(node) = self.arena[id].node.clone() {
                    let parent = self.parent_node(id);
                    self.host.append_child(&parent, &node)?;
                    self.tracer.on_effect_applied(id, EffectTag::Placement);
                }
            }
            Some(EffectTag::Update) => {
                if let Some(node) = self.arena[id].node.clone() {
                    let old_props = self.arena[id]
                        .alternate
                        .map(|alt| self.arena[alt].props.clone())
                        .unwrap_or_default();
                    let new_props = self.arena[id].props.clone();
                    for patch in diff_props(&old_props, &new_props) {
                        Self::apply_patch(&mut self.host, &node, patch)?;
                    }
                    self.tracer.on_effect_applied(id, EffectTag::Update);
                }
            }
            // Deletions are detached before the walk and are never linked
            // into the new chain, so this arm is a defensive no-op.
            Some(EffectTag::Deletion) | None => {}
        }
        Ok(())
    }

    fn commit_deletion(&mut self, id: FiberId) -> Result<(), RenderError> {
        if let Some(node) = self.arena[id].node.clone() {
            let parent = self.parent_node(id);
            self.host.remove_child(&parent, &node)?;
            self.tracer.on_effect_applied(id, EffectTag::Deletion);
        }
        Ok(())
    }

    /// Host node of the nearest ancestor that owns one. The walk terminates
    /// at the root fiber, which always owns the container.
    fn parent_node(&self, id: FiberId) -> H::Node {
        let mut current = self.arena[id].parent;
        while let Some(ancestor) = current {
            if let Some(node) = &self.arena[ancestor].node {
                return node.clone();
            }
            current = self.arena[ancestor].parent;
        }
        self.container.clone()
    }

    /// Discard the in-progress generation, if any: release its fibers,
    /// clear the continuation, and untag collected deletions (they belong
    /// to the committed tree, which stays alive).
    fn reset_in_progress(&mut self) {
        if let Some(wip) = self.wip_root.take() {
            self.arena.release_tree(wip);
        }
        self.next_unit = None;
        for id in std::mem::take(&mut self.deletions) {
            self.arena[id].effect = None;
        }
    }
}
