//! Registry of outstanding requests.

use parking_lot::Mutex;
use std::collections::HashSet;
use syncline_strategy::{RequestCancellation, RequestId};
use tracing::debug;

/// Tracks outstanding requests so they can be cancelled in bulk.
///
/// Strategies register emitted requests through the
/// [`RequestCancellation`] capability and deregister them at teardown. The
/// transport reports completions via [`CancellationRegistry::complete`].
/// Bulk cancellation ([`CancellationRegistry::cancel_all`]) is triggered
/// externally, on logout or client deletion, never by a polling strategy.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    outstanding: Mutex<HashSet<RequestId>>,
}

impl CancellationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests currently outstanding.
    pub fn outstanding_count(&self) -> usize {
        self.outstanding.lock().len()
    }

    /// Returns true if the given request is still outstanding.
    pub fn is_outstanding(&self, id: RequestId) -> bool {
        self.outstanding.lock().contains(&id)
    }

    /// Marks a request as completed by the transport.
    ///
    /// Returns true if the request was still tracked.
    pub fn complete(&self, id: RequestId) -> bool {
        self.outstanding.lock().remove(&id)
    }

    /// Drains every outstanding request for bulk cancellation.
    pub fn cancel_all(&self) -> Vec<RequestId> {
        let drained: Vec<RequestId> = self.outstanding.lock().drain().collect();
        if !drained.is_empty() {
            debug!(count = drained.len(), "cancelling outstanding requests");
        }
        drained
    }
}

impl RequestCancellation for CancellationRegistry {
    fn register(&self, id: RequestId) {
        self.outstanding.lock().insert(id);
    }

    fn deregister(&self, id: RequestId) {
        self.outstanding.lock().remove(&id);
    }
}
