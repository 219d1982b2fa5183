//! Integration tests for the scheduler and strategy layer.

use std::sync::{Arc, Weak};
use syncline_scheduler::{
    ApplicationStatus, CycleResult, RecordingSubmitter, Scheduler, SchedulerConfig,
};
use syncline_strategy::{
    AppState, AppStatusReader, GatedStrategy, OperationMode, Request, RequestCancellation,
    RequestGenerator, RequestStrategy, ScriptedGenerator, StrategyConfig,
};
use syncline_testkit::FailingGenerator;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn gated<G>(
    status: &Arc<ApplicationStatus>,
    scheduler: &Scheduler<RecordingSubmitter>,
    configuration: StrategyConfig,
    generator: G,
) -> Arc<dyn RequestStrategy>
where
    G: RequestGenerator<()> + 'static,
{
    Arc::new(GatedStrategy::new(
        Arc::new(()),
        Arc::downgrade(status) as Weak<dyn AppStatusReader>,
        Arc::downgrade(scheduler.registry()) as Weak<dyn RequestCancellation>,
        configuration,
        generator,
    ))
}

fn scripted_with(kinds: &[&str]) -> ScriptedGenerator {
    let mut generator = ScriptedGenerator::new();
    for kind in kinds {
        generator.enqueue_request(Request::new(*kind));
    }
    generator
}

fn submitted_kinds(scheduler: &Scheduler<RecordingSubmitter>) -> Vec<String> {
    scheduler
        .submitter()
        .submitted()
        .iter()
        .map(|request| request.kind().to_string())
        .collect()
}

#[test]
fn login_flow_gates_strategies_by_state() {
    init_tracing();

    let status = Arc::new(ApplicationStatus::new(AppState::Unauthenticated));
    let scheduler = Scheduler::new(SchedulerConfig::default(), RecordingSubmitter::new());

    // Registration work runs before authentication and during catch-up;
    // message sending only once the client is in steady state.
    let registration = gated(
        &status,
        &scheduler,
        StrategyConfig::ALLOW_WHILE_UNAUTHENTICATED | StrategyConfig::ALLOW_DURING_SYNC,
        scripted_with(&["client-registration", "client-registration"]),
    );
    let messaging = gated(
        &status,
        &scheduler,
        StrategyConfig::ALLOW_DURING_EVENT_PROCESSING,
        scripted_with(&["message-send"]),
    );
    scheduler.register(registration).unwrap();
    scheduler.register(messaging).unwrap();

    // Unauthenticated: only the registration strategy may act.
    assert_eq!(scheduler.run_cycle().submitted, 1);

    // Catching up on history: registration still allowed, messaging not.
    status.set_app_state(AppState::Syncing);
    assert_eq!(scheduler.run_cycle().submitted, 1);

    // Steady state: registration has run dry, messaging takes over.
    status.set_app_state(AppState::EventProcessing);
    assert_eq!(scheduler.run_cycle().submitted, 1);

    assert_eq!(
        submitted_kinds(&scheduler),
        vec!["client-registration", "client-registration", "message-send"]
    );
    assert_eq!(scheduler.registry().outstanding_count(), 3);

    let stats = scheduler.stats();
    assert_eq!(stats.cycles_completed, 3);
    assert_eq!(stats.requests_submitted, 3);
    assert_eq!(stats.generation_errors, 0);
}

#[test]
fn reactive_strategies_stay_silent_across_the_lifecycle() {
    let status = Arc::new(ApplicationStatus::new(AppState::Unauthenticated));
    let scheduler = Scheduler::new(SchedulerConfig::default(), RecordingSubmitter::new());

    // A purely reactive strategy declares no permissions at all; its hook
    // failing the test is the proof the gate never opened.
    let reactive = gated(&status, &scheduler, StrategyConfig::empty(), FailingGenerator);
    scheduler.register(reactive).unwrap();

    for state in [
        AppState::Unauthenticated,
        AppState::Syncing,
        AppState::EventProcessing,
    ] {
        status.set_app_state(state);
        assert_eq!(scheduler.run_cycle().submitted, 0);
    }
    assert_eq!(scheduler.stats().requests_submitted, 0);
}

#[test]
fn backgrounding_suspends_strategies_without_the_background_bit() {
    let status = Arc::new(ApplicationStatus::new(AppState::EventProcessing));
    let scheduler = Scheduler::new(SchedulerConfig::default(), RecordingSubmitter::new());

    let foreground_only = gated(
        &status,
        &scheduler,
        StrategyConfig::ALLOW_DURING_EVENT_PROCESSING,
        scripted_with(&["message-send"]),
    );
    let backgroundable = gated(
        &status,
        &scheduler,
        StrategyConfig::ALLOW_DURING_EVENT_PROCESSING | StrategyConfig::ALLOW_WHILE_IN_BACKGROUND,
        scripted_with(&["delivery-receipt"]),
    );
    scheduler.register(foreground_only).unwrap();
    scheduler.register(backgroundable).unwrap();

    status.set_operation_mode(OperationMode::Background);
    scheduler.run_cycle();
    assert_eq!(submitted_kinds(&scheduler), vec!["delivery-receipt"]);

    // Back in the foreground both may act again.
    status.set_operation_mode(OperationMode::Foreground);
    scheduler.run_cycle();
    assert_eq!(
        submitted_kinds(&scheduler),
        vec!["delivery-receipt", "message-send"]
    );
}

#[test]
fn logout_cancels_outstanding_requests() {
    let status = Arc::new(ApplicationStatus::new(AppState::EventProcessing));
    let scheduler = Scheduler::new(SchedulerConfig::default(), RecordingSubmitter::new());

    let strategy = gated(
        &status,
        &scheduler,
        StrategyConfig::ALLOW_DURING_EVENT_PROCESSING,
        scripted_with(&["asset-fetch", "asset-fetch"]),
    );
    scheduler.register(strategy).unwrap();
    scheduler.run_cycle();
    scheduler.run_cycle();
    assert_eq!(scheduler.registry().outstanding_count(), 2);
    let emitted: Vec<_> = scheduler
        .submitter()
        .submitted()
        .iter()
        .map(|request| request.id())
        .collect();

    // Logout: the session layer drops to unauthenticated and cancels in
    // bulk; strategies themselves never retract what they emitted.
    status.set_app_state(AppState::Unauthenticated);
    scheduler.cancel_outstanding();

    assert_eq!(scheduler.registry().outstanding_count(), 0);
    let cancelled = scheduler.submitter().cancelled();
    assert_eq!(cancelled.len(), 2);
    for id in emitted {
        assert!(cancelled.contains(&id));
    }

    // Nothing new is produced in a state the strategy never opted into.
    assert_eq!(scheduler.run_cycle().submitted, 0);
}

#[test]
fn shutdown_stops_production_for_good() {
    let status = Arc::new(ApplicationStatus::new(AppState::EventProcessing));
    let scheduler = Scheduler::new(SchedulerConfig::default(), RecordingSubmitter::new());

    let strategy = gated(
        &status,
        &scheduler,
        StrategyConfig::ALLOW_DURING_EVENT_PROCESSING,
        scripted_with(&["message-send", "message-send"]),
    );
    scheduler.register(Arc::clone(&strategy)).unwrap();
    scheduler.run_cycle();

    scheduler.shut_down();
    scheduler.shut_down();

    // A racing final cycle is a harmless no-op, and the torn-down strategy
    // polls as no-request even when asked directly.
    assert_eq!(scheduler.run_cycle().polled, 0);
    assert!(strategy.poll_once().unwrap().is_none());
    assert_eq!(scheduler.registry().outstanding_count(), 0);
}

#[test]
fn dropping_the_status_provider_quiesces_all_strategies() {
    let status = Arc::new(ApplicationStatus::new(AppState::EventProcessing));
    let scheduler = Scheduler::new(SchedulerConfig::default(), RecordingSubmitter::new());

    let strategy = gated(
        &status,
        &scheduler,
        StrategyConfig::all(),
        scripted_with(&["message-send"]),
    );
    scheduler.register(strategy).unwrap();

    // The host released the provider: polls quietly produce nothing.
    drop(status);
    assert_eq!(
        scheduler.run_cycle(),
        CycleResult {
            polled: 1,
            submitted: 0,
            errors: 0
        }
    );
}
