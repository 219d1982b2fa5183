//! The gated polling contract.

use crate::app_state::AppStatusReader;
use crate::cancellation::RequestCancellation;
use crate::config::StrategyConfig;
use crate::error::{StrategyError, StrategyResult};
use crate::request::{Request, RequestId};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// The specialization hook: builds the next request, if any.
///
/// Implementations carry the strategy-specific logic (message sending,
/// client registration, asset fetching, ...). The hook is only invoked
/// once the gate has allowed the poll, and returns zero or exactly one
/// request per invocation. There is no default implementation; a strategy
/// with no generation logic does not construct.
pub trait RequestGenerator<C>: Send {
    /// Builds the next request against the shared persistence context.
    ///
    /// `Ok(None)` means "nothing to do right now" and is the common case.
    /// Errors propagate to the scheduler unchanged.
    fn generate(&mut self, context: &C) -> StrategyResult<Option<Request>>;
}

/// A schedulable unit that may emit one request per poll.
///
/// This is the surface the scheduler sees. Polling is sequential per cycle;
/// implementations are not designed for concurrent polls.
pub trait RequestStrategy: Send + Sync {
    /// Polls for the next request.
    ///
    /// Must not block: the gating decision is an in-memory check, and any
    /// I/O belongs to the transport layer after submission. `Ok(None)` is
    /// the normal outcome whenever gating forbids action, the status
    /// provider is gone, the strategy is torn down, or there is simply
    /// nothing to do.
    fn poll_once(&self) -> StrategyResult<Option<Request>>;

    /// Releases the strategy's resources.
    ///
    /// Idempotent. After teardown every subsequent poll returns `Ok(None)`;
    /// schedulers may race a final queued poll against teardown, so this
    /// must degrade gracefully rather than crash.
    fn tear_down(&self);

    /// The permission mask this strategy was constructed with.
    fn configuration(&self) -> StrategyConfig;
}

/// Mutable strategy state, guarded by one lock so a poll never observes a
/// half-torn-down strategy.
struct Inner<C, G> {
    context: Option<Arc<C>>,
    generator: G,
    outstanding: Vec<RequestId>,
    torn_down: bool,
}

/// The reusable gate around a [`RequestGenerator`].
///
/// Holds a shared persistence-context handle (lifetime governed by the
/// host), a non-owning handle to the status provider, a non-owning handle
/// to the cancellation capability, and the immutable permission mask. The
/// gate reads the current app state on every poll and invokes the generator
/// only when the prerequisites are a subset of the mask.
pub struct GatedStrategy<C, G> {
    status: Weak<dyn AppStatusReader>,
    cancellation: Weak<dyn RequestCancellation>,
    configuration: StrategyConfig,
    inner: Mutex<Inner<C, G>>,
}

impl<C, G> GatedStrategy<C, G>
where
    C: Send + Sync,
    G: RequestGenerator<C>,
{
    /// Creates a gated strategy.
    ///
    /// All collaborators are required; the weak handles make their later
    /// disappearance a checked, normal condition rather than a hazard.
    pub fn new(
        context: Arc<C>,
        status: Weak<dyn AppStatusReader>,
        cancellation: Weak<dyn RequestCancellation>,
        configuration: StrategyConfig,
        generator: G,
    ) -> Self {
        Self {
            status,
            cancellation,
            configuration,
            inner: Mutex::new(Inner {
                context: Some(context),
                generator,
                outstanding: Vec::new(),
                torn_down: false,
            }),
        }
    }

    /// Returns true once [`RequestStrategy::tear_down`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().torn_down
    }
}

impl<C, G> RequestStrategy for GatedStrategy<C, G>
where
    C: Send + Sync,
    G: RequestGenerator<C>,
{
    fn poll_once(&self) -> StrategyResult<Option<Request>> {
        let mut inner = self.inner.lock();
        if inner.torn_down {
            return Ok(None);
        }

        // A released provider signals host shutdown; stop emitting without
        // extending its lifetime beyond this poll.
        let Some(status) = self.status.upgrade() else {
            trace!("status provider released, emitting no request");
            return Ok(None);
        };

        let prerequisites =
            StrategyConfig::prerequisites(status.app_state(), status.operation_mode());
        if !self.configuration.contains(prerequisites) {
            return Ok(None);
        }
        drop(status);

        let context = match &inner.context {
            Some(context) => Arc::clone(context),
            None => return Ok(None),
        };

        let request = inner.generator.generate(&context)?;
        if let Some(request) = &request {
            if let Some(cancellation) = self.cancellation.upgrade() {
                cancellation.register(request.id());
                inner.outstanding.push(request.id());
            }
            trace!(id = %request.id(), kind = request.kind(), "request generated");
        }
        Ok(request)
    }

    fn tear_down(&self) {
        let mut inner = self.inner.lock();
        if inner.torn_down {
            return;
        }
        inner.torn_down = true;
        inner.context = None;

        let outstanding = std::mem::take(&mut inner.outstanding);
        if let Some(cancellation) = self.cancellation.upgrade() {
            for id in &outstanding {
                cancellation.deregister(*id);
            }
        }
        debug!(outstanding = outstanding.len(), "strategy torn down");
    }

    fn configuration(&self) -> StrategyConfig {
        self.configuration
    }
}

/// A scripted generator for testing.
///
/// Pops one scripted response per invocation and counts how often it was
/// invoked; once the script runs dry it keeps answering `Ok(None)`. The
/// counter is shared so tests can observe it after the generator has moved
/// into a [`GatedStrategy`].
pub struct ScriptedGenerator {
    script: VecDeque<StrategyResult<Option<Request>>>,
    invocations: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    /// Creates a generator with an empty script.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Scripts a request to be returned by the next invocation.
    pub fn enqueue_request(&mut self, request: Request) {
        self.script.push_back(Ok(Some(request)));
    }

    /// Scripts an error.
    pub fn enqueue_error(&mut self, error: StrategyError) {
        self.script.push_back(Err(error));
    }

    /// Shared invocation counter; clone before moving the generator.
    pub fn invocation_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.invocations)
    }
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RequestGenerator<C> for ScriptedGenerator {
    fn generate(&mut self, _context: &C) -> StrategyResult<Option<Request>> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.script.pop_front().unwrap_or(Ok(None))
    }
}
