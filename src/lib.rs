//! Fiber-Flow: an incremental UI-rendering engine.
//!
//! This crate turns a declarative, immutable description of a node tree
//! ("elements") into a sequence of mutations against a mutable host tree,
//! performing the diff and the mutation work in small, interruptible units
//! instead of one blocking pass.
//!
//! # Key Features
//!
//! - **Host-agnostic**: all real node creation and mutation goes through the
//!   [`HostAdapter`] trait; the engine binds to no particular host runtime.
//! - **Cooperative**: the work loop processes one fiber at a time and yields
//!   when the [`Deadline`] reports the slice is spent, resuming later from
//!   exactly where it left off.
//! - **Two-generation diffing**: each render builds a work-in-progress fiber
//!   tree linked position-by-position (via `alternate`) to the previously
//!   committed tree, so updates reuse host nodes and only changed
//!   properties are touched.
//! - **Atomic commit**: once tree building finishes, all deletions and then
//!   all placements/updates are applied in one uninterruptible phase, so
//!   the host tree is never observed half-updated.
//! - **Deterministic testing**: mock deadlines ([`UnitBudget`]) and the
//!   [`Tracer`] observer make the scheduler fully testable without a real
//!   host runtime.
//!
//! # Example
//!
//! ```ignore
//! use fiber_flow::{Element, Props, Renderer, TimeSlice, WorkStatus};
//!
//! let mut renderer = Renderer::new(host, container);
//!
//! renderer.render(Element::new(
//!     "div",
//!     Props::new(),
//!     [
//!         Element::new("input", Props::new().with("value", "World"), []),
//!         Element::new("h2", Props::new(), ["Hello World".into()]),
//!     ],
//! ));
//!
//! // Drive the render cooperatively from the host's idle callback:
//! while let WorkStatus::Yielded = renderer.work(&TimeSlice::new(slice))? {}
//! ```
//!
//! Reconciliation is positional: children are matched to the previous
//! generation by index and node type only, never by key, so a reordered
//! list reconciles as deletions plus placements. This keeps the diff
//! O(max(old, new)) with no auxiliary index.

mod element;
mod error;
mod fiber;
mod host;
mod props;
mod reconcile;
mod renderer;
mod scheduler;
#[cfg(feature = "shared")]
mod shared;
mod tracer;

pub use element::{Element, NodeType, NODE_VALUE};
pub use error::RenderError;
pub use fiber::{EffectTag, FiberId};
pub use host::{HostAdapter, HostError};
pub use props::{diff_props, event_name, is_event, Callback, PropPatch, PropValue, Props};
pub use renderer::{Renderer, WorkStatus};
pub use scheduler::{Deadline, NeverYield, TimeSlice, UnitBudget, YIELD_MARGIN};
#[cfg(feature = "shared")]
pub use shared::SharedRenderer;
pub use tracer::{NoopTracer, Tracer};
