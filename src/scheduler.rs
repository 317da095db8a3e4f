//! Deadline capability for cooperative scheduling.
//!
//! The work loop does not bind to any particular host runtime. Whatever
//! idle-callback facility the embedding environment has, it drives
//! [`Renderer::work`](crate::Renderer::work) repeatedly, handing it a fresh
//! [`Deadline`] each turn. Deterministic implementations make the loop fully
//! testable without a real host runtime.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Yield margin: the slice counts as exhausted once less than this much
/// time remains.
pub const YIELD_MARGIN: Duration = Duration::from_millis(1);

/// Reports how much of the current scheduling slice is left.
///
/// The work loop polls [`should_yield`](Deadline::should_yield) once after
/// each unit of work, so a slice always makes progress of at least one unit.
pub trait Deadline {
    /// Time remaining in the current slice.
    fn time_remaining(&self) -> Duration;

    /// True once the slice is spent. The default compares
    /// [`time_remaining`](Deadline::time_remaining) against [`YIELD_MARGIN`].
    fn should_yield(&self) -> bool {
        self.time_remaining() < YIELD_MARGIN
    }
}

impl<D: Deadline + ?Sized> Deadline for &D {
    fn time_remaining(&self) -> Duration {
        (**self).time_remaining()
    }

    fn should_yield(&self) -> bool {
        (**self).should_yield()
    }
}

/// A deadline with ample time: the loop never yields and a render runs to
/// completion, commit included, in a single call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverYield;

impl Deadline for NeverYield {
    fn time_remaining(&self) -> Duration {
        Duration::MAX
    }

    fn should_yield(&self) -> bool {
        false
    }
}

/// A wall-clock slice, for live hosts: yields once the slice end is less
/// than [`YIELD_MARGIN`] away.
#[derive(Debug, Clone, Copy)]
pub struct TimeSlice {
    end: Instant,
}

impl TimeSlice {
    /// A slice of the given length starting now.
    pub fn new(budget: Duration) -> Self {
        Self {
            end: Instant::now() + budget,
        }
    }

    /// A slice ending at a host-supplied instant.
    pub fn until(end: Instant) -> Self {
        Self { end }
    }
}

impl Deadline for TimeSlice {
    fn time_remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }
}

/// A deterministic deadline for tests: reports exhaustion after a fixed
/// number of `should_yield` polls.
///
/// Since the work loop polls once per unit, `UnitBudget::new(n)` lets
/// exactly `n` units run before the loop yields (the loop always performs
/// at least one unit per turn, so a budget of zero still admits one).
#[derive(Debug)]
pub struct UnitBudget {
    remaining: Cell<usize>,
}

impl UnitBudget {
    /// Allow `units` polls before yielding.
    pub fn new(units: usize) -> Self {
        Self {
            remaining: Cell::new(units),
        }
    }
}

impl Deadline for UnitBudget {
    fn time_remaining(&self) -> Duration {
        if self.remaining.get() > 0 {
            Duration::MAX
        } else {
            Duration::ZERO
        }
    }

    fn should_yield(&self) -> bool {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return true;
        }
        self.remaining.set(remaining - 1);
        remaining == 1
    }
}
