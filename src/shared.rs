//! Serialized sharing of a renderer across threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::element::Element;
use crate::error::RenderError;
use crate::host::HostAdapter;
use crate::renderer::{Renderer, WorkStatus};
use crate::scheduler::Deadline;

/// A cheap-to-clone handle to a renderer, for embeddings that drive work and
/// deliver events from more than one thread.
///
/// Render state must never be mutated by more than one logical render
/// pipeline at a time; this handle serializes every unit-of-work batch and
/// the commit behind one mutex, so clones can be passed around freely.
///
/// # Example
///
/// ```ignore
/// use fiber_flow::{SharedRenderer, TimeSlice};
///
/// let shared = SharedRenderer::new(renderer);
/// let driver = shared.clone();
/// scheduler.on_idle(move |slice| {
///     driver.work(&TimeSlice::until(slice.end())).unwrap();
/// });
/// ```
pub struct SharedRenderer<H: HostAdapter> {
    inner: Arc<Mutex<Renderer<H>>>,
}

impl<H: HostAdapter> Clone for SharedRenderer<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: HostAdapter> SharedRenderer<H> {
    /// Wrap a renderer in a shared handle.
    pub fn new(renderer: Renderer<H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(renderer)),
        }
    }

    /// See [`Renderer::render`].
    pub fn render(&self, element: Element) {
        self.inner.lock().render(element)
    }

    /// See [`Renderer::work`]. The lock is held for the whole slice.
    pub fn work(&self, deadline: &impl Deadline) -> Result<WorkStatus, RenderError> {
        self.inner.lock().work(deadline)
    }

    /// See [`Renderer::flush`].
    pub fn flush(&self) -> Result<(), RenderError> {
        self.inner.lock().flush()
    }

    /// See [`Renderer::is_idle`].
    pub fn is_idle(&self) -> bool {
        self.inner.lock().is_idle()
    }

    /// Run `f` with exclusive access to the renderer, e.g. to reach the
    /// host adapter.
    pub fn with<R>(&self, f: impl FnOnce(&mut Renderer<H>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
