//! Concrete application-status provider.

use parking_lot::RwLock;
use syncline_strategy::{AppState, AppStatusReader, OperationMode};
use tracing::debug;

/// The application-status provider strategies read through
/// [`AppStatusReader`].
///
/// The session layer owns the provider and mutates it as the lifecycle
/// progresses (login, catch-up, steady state, backgrounding). Strategies
/// hold it only weakly: dropping the provider is the host's shutdown
/// signal, after which every strategy polls as no-request.
#[derive(Debug)]
pub struct ApplicationStatus {
    state: RwLock<AppState>,
    mode: RwLock<OperationMode>,
}

impl ApplicationStatus {
    /// Creates a provider in the given state, foregrounded.
    pub fn new(state: AppState) -> Self {
        Self {
            state: RwLock::new(state),
            mode: RwLock::new(OperationMode::Foreground),
        }
    }

    /// Transitions the lifecycle state.
    pub fn set_app_state(&self, state: AppState) {
        let previous = {
            let mut guard = self.state.write();
            std::mem::replace(&mut *guard, state)
        };
        if previous != state {
            debug!(?previous, current = ?state, "app state transition");
        }
    }

    /// Transitions the foreground/background mode.
    pub fn set_operation_mode(&self, mode: OperationMode) {
        let previous = {
            let mut guard = self.mode.write();
            std::mem::replace(&mut *guard, mode)
        };
        if previous != mode {
            debug!(?previous, current = ?mode, "operation mode transition");
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::new(AppState::Unauthenticated)
    }
}

impl AppStatusReader for ApplicationStatus {
    fn app_state(&self) -> AppState {
        *self.state.read()
    }

    fn operation_mode(&self) -> OperationMode {
        *self.mode.read()
    }
}
