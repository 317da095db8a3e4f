//! Error type for render execution.

use std::fmt;
use std::sync::Arc;

/// Errors surfaced while building or committing a render generation.
///
/// Host adapter errors can be propagated using the `?` operator, which
/// automatically converts any `Into<anyhow::Error>` type into
/// `RenderError::Host`.
#[derive(Debug, Clone)]
pub enum RenderError {
    /// The host adapter failed while creating or mutating a node.
    ///
    /// The error propagates synchronously out of the current unit of work or
    /// commit step, aborting the render generation in progress. The renderer
    /// resets its in-progress state before returning, so the next
    /// [`render`](crate::Renderer::render) call starts cleanly; the last
    /// committed tree is untouched. Host mutations already applied by a
    /// failed commit are not rolled back.
    Host(Arc<anyhow::Error>),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Host(e) => write!(f, "host adapter error: {}", e),
        }
    }
}

impl<T: Into<anyhow::Error>> From<T> for RenderError {
    fn from(err: T) -> Self {
        RenderError::Host(Arc::new(err.into()))
    }
}

impl RenderError {
    /// Returns a reference to the underlying adapter error.
    pub fn host_error(&self) -> Option<&Arc<anyhow::Error>> {
        match self {
            RenderError::Host(e) => Some(e),
        }
    }

    /// Attempts to downcast the adapter error to a specific type.
    ///
    /// Returns `Some(&E)` if this is a `Host` error wrapping an error of
    /// type `E`, otherwise `None`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use fiber_flow::HostError;
    ///
    /// match renderer.flush() {
    ///     Err(e) if e.is::<HostError>() => {
    ///         eprintln!("rejected by host: {}", e.downcast_ref::<HostError>().unwrap());
    ///     }
    ///     other => other?,
    /// }
    /// ```
    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.host_error().and_then(|e| e.downcast_ref::<E>())
    }

    /// Returns `true` if this wraps an adapter error of type `E`.
    pub fn is<E: std::error::Error + Send + Sync + 'static>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }
}
