//! Outbound request envelope.

use std::fmt;
use uuid::Uuid;

/// Unique identifier of an outbound request.
///
/// Used by the cancellation registry to address in-flight work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A pending unit of network work.
///
/// Opaque to the strategy layer: the payload is handed verbatim to the
/// transport, which owns encoding, delivery and response handling.
/// Ownership transfers to the scheduler on return from a poll.
#[derive(Debug, Clone)]
pub struct Request {
    id: RequestId,
    kind: String,
    payload: Vec<u8>,
}

impl Request {
    /// Creates a request with a fresh id, an empty payload and a short
    /// diagnostic kind (e.g. `"message-send"`).
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            kind: kind.into(),
            payload: Vec::new(),
        }
    }

    /// Attaches an opaque transport payload.
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    /// The request id.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// The diagnostic kind label.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The opaque transport payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
