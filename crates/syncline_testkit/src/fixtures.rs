//! Strategy fixtures wired to mock collaborators.

use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Weak};
use syncline_strategy::{
    AppState, AppStatusReader, GatedStrategy, MockCancellation, MockStatus, Request,
    RequestCancellation, RequestGenerator, ScriptedGenerator, StrategyConfig, StrategyResult,
};

/// A generator that must never run.
///
/// Panics when invoked, failing the test that reached it. For test suites
/// only: use it wherever an assertion says "the gate must not call the
/// hook here".
#[derive(Debug, Default)]
pub struct FailingGenerator;

impl<C> RequestGenerator<C> for FailingGenerator {
    fn generate(&mut self, _context: &C) -> StrategyResult<Option<Request>> {
        panic!("request generator invoked unexpectedly");
    }
}

/// A gated strategy wired to mock status and cancellation collaborators.
///
/// The fixture keeps the strong handles alive; drop `status` to simulate
/// the provider disappearing mid-shutdown.
pub struct GateFixture<G> {
    /// The settable status provider the strategy reads.
    pub status: Arc<MockStatus>,
    /// The recording cancellation capability.
    pub cancellation: Arc<MockCancellation>,
    /// The strategy under test.
    pub strategy: GatedStrategy<(), G>,
}

impl<G> GateFixture<G>
where
    G: RequestGenerator<()>,
{
    /// Wires a fixture around the given generator, starting in `Syncing`.
    pub fn with_generator(configuration: StrategyConfig, generator: G) -> Self {
        let status = Arc::new(MockStatus::new(AppState::Syncing));
        let cancellation = Arc::new(MockCancellation::new());
        let strategy = GatedStrategy::new(
            Arc::new(()),
            Arc::downgrade(&status) as Weak<dyn AppStatusReader>,
            Arc::downgrade(&cancellation) as Weak<dyn RequestCancellation>,
            configuration,
            generator,
        );
        Self {
            status,
            cancellation,
            strategy,
        }
    }
}

impl GateFixture<ScriptedGenerator> {
    /// Wires a fixture around a fresh scripted generator, returning the
    /// shared invocation counter alongside it.
    pub fn scripted(configuration: StrategyConfig) -> (Self, Arc<AtomicUsize>) {
        let generator = ScriptedGenerator::new();
        let counter = generator.invocation_counter();
        (Self::with_generator(configuration, generator), counter)
    }
}

impl GateFixture<FailingGenerator> {
    /// Wires a fixture whose hook fails the test if it ever runs.
    pub fn failing(configuration: StrategyConfig) -> Self {
        Self::with_generator(configuration, FailingGenerator)
    }
}
