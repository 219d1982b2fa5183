//! Request cancellation capability.

use crate::request::RequestId;
use parking_lot::Mutex;

/// Capability to track outstanding requests for later bulk cancellation.
///
/// Strategies register every request they emit and deregister their
/// outstanding ids at teardown. Actual cancellation (on logout or client
/// deletion) is triggered externally through the registry implementation,
/// never by a polling strategy.
pub trait RequestCancellation: Send + Sync {
    /// Records an emitted request as outstanding.
    fn register(&self, id: RequestId);

    /// Removes a request from the outstanding set.
    ///
    /// Deregistering an id that is no longer tracked is a no-op.
    fn deregister(&self, id: RequestId);
}

/// A recording cancellation capability for testing.
#[derive(Debug, Default)]
pub struct MockCancellation {
    registered: Mutex<Vec<RequestId>>,
    deregistered: Mutex<Vec<RequestId>>,
}

impl MockCancellation {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All ids registered so far, in order.
    pub fn registered(&self) -> Vec<RequestId> {
        self.registered.lock().clone()
    }

    /// All ids deregistered so far, in order.
    pub fn deregistered(&self) -> Vec<RequestId> {
        self.deregistered.lock().clone()
    }

    /// Number of ids registered but not yet deregistered.
    pub fn outstanding(&self) -> usize {
        self.registered.lock().len() - self.deregistered.lock().len()
    }
}

impl RequestCancellation for MockCancellation {
    fn register(&self, id: RequestId) {
        self.registered.lock().push(id);
    }

    fn deregister(&self, id: RequestId) {
        self.deregistered.lock().push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_registrations_in_order() {
        let cancellation = MockCancellation::new();
        let first = RequestId::new();
        let second = RequestId::new();

        cancellation.register(first);
        cancellation.register(second);
        assert_eq!(cancellation.registered(), vec![first, second]);
        assert_eq!(cancellation.outstanding(), 2);

        cancellation.deregister(first);
        assert_eq!(cancellation.deregistered(), vec![first]);
        assert_eq!(cancellation.outstanding(), 1);
    }
}
