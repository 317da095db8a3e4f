//! Tracer trait for observing render execution.
//!
//! This module defines the [`Tracer`] trait for observing the work loop and
//! commit phase. The default [`NoopTracer`] provides zero cost when tracing
//! is not needed.
//!
//! All methods have default empty implementations, so implementations only
//! override the events they are interested in. Tests use recording tracers
//! to assert scheduling behavior (units performed, yields, commit bounds)
//! without a real host runtime.

use crate::fiber::{EffectTag, FiberId};

/// Observer of render lifecycle events.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a shared renderer may invoke the
/// tracer from whichever thread currently drives the work loop.
pub trait Tracer: Send + Sync + 'static {
    /// Called when a render call seeds a new work-in-progress generation.
    #[inline]
    fn on_render_scheduled(&self) {}

    /// Called after one fiber has been processed as a unit of work.
    #[inline]
    fn on_unit_performed(&self, _fiber: FiberId) {}

    /// Called when the loop yields with work remaining.
    #[inline]
    fn on_yielded(&self) {}

    /// Called when the commit phase begins.
    #[inline]
    fn on_commit_started(&self) {}

    /// Called for each effect applied to the host during commit.
    #[inline]
    fn on_effect_applied(&self, _fiber: FiberId, _effect: EffectTag) {}

    /// Called when the commit phase ends and the tree has been promoted.
    #[inline]
    fn on_commit_finished(&self) {}
}

/// Zero-cost tracer that discards all events.
///
/// This is the default tracer for [`Renderer`](crate::Renderer).
pub struct NoopTracer;

impl Tracer for NoopTracer {}
