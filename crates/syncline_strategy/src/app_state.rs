//! Application lifecycle state read by strategies.

use parking_lot::RwLock;

/// Coarse phase of the client lifecycle.
///
/// Owned and mutated exclusively by the status provider; strategies only
/// ever read it through [`AppStatusReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    /// No authenticated session yet (login, registration).
    Unauthenticated,
    /// Catching up on history after login or reconnect.
    Syncing,
    /// Normal steady-state operation, processing live events.
    EventProcessing,
}

impl AppState {
    /// Returns true once the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, AppState::Unauthenticated)
    }
}

/// Whether the application is frontmost or backgrounded.
///
/// An orthogonal gating dimension: strategies must additionally opt into
/// running while backgrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationMode {
    /// Application is frontmost.
    #[default]
    Foreground,
    /// Application has been backgrounded by the OS.
    Background,
}

/// Read-only view of the current application status.
///
/// This is the only delegate surface the strategy layer depends on. Both
/// reads must be wait-free from the caller's perspective; strategies hold
/// the provider weakly and treat its absence as a shutdown signal.
pub trait AppStatusReader: Send + Sync {
    /// Current lifecycle state.
    fn app_state(&self) -> AppState;

    /// Current foreground/background mode.
    fn operation_mode(&self) -> OperationMode;
}

/// A settable status reader for testing.
#[derive(Debug)]
pub struct MockStatus {
    state: RwLock<AppState>,
    mode: RwLock<OperationMode>,
}

impl MockStatus {
    /// Creates a mock status in the given state, foregrounded.
    pub fn new(state: AppState) -> Self {
        Self {
            state: RwLock::new(state),
            mode: RwLock::new(OperationMode::Foreground),
        }
    }

    /// Sets the lifecycle state.
    pub fn set_app_state(&self, state: AppState) {
        *self.state.write() = state;
    }

    /// Sets the operation mode.
    pub fn set_operation_mode(&self, mode: OperationMode) {
        *self.mode.write() = mode;
    }
}

impl AppStatusReader for MockStatus {
    fn app_state(&self) -> AppState {
        *self.state.read()
    }

    fn operation_mode(&self) -> OperationMode {
        *self.mode.read()
    }
}
