//! Transport seam for produced requests.

use parking_lot::Mutex;
use syncline_strategy::{Request, RequestId};

/// Receives requests produced by strategies.
///
/// Ownership of a request transfers here; encoding, delivery and retry are
/// the transport layer's concern. `cancel` asks the transport to abort an
/// in-flight request it may still hold.
pub trait RequestSubmitter: Send + Sync {
    /// Accepts a request for transmission.
    fn submit(&self, request: Request);

    /// Aborts an in-flight request, if the transport still holds it.
    fn cancel(&self, id: RequestId);
}

/// A submitter that records everything it receives, for testing.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    submitted: Mutex<Vec<Request>>,
    cancelled: Mutex<Vec<RequestId>>,
}

impl RecordingSubmitter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests submitted so far, in order.
    pub fn submitted(&self) -> Vec<Request> {
        self.submitted.lock().clone()
    }

    /// All cancellations received so far, in order.
    pub fn cancelled(&self) -> Vec<RequestId> {
        self.cancelled.lock().clone()
    }
}

impl RequestSubmitter for RecordingSubmitter {
    fn submit(&self, request: Request) {
        self.submitted.lock().push(request);
    }

    fn cancel(&self, id: RequestId) {
        self.cancelled.lock().push(id);
    }
}
