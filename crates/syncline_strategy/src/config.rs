//! Strategy permission mask and prerequisite mapping.

use crate::app_state::{AppState, OperationMode};
use bitflags::bitflags;

bitflags! {
    /// App states in which a strategy is permitted to emit requests.
    ///
    /// The mask is fixed at strategy construction and immutable thereafter.
    /// An empty mask means the strategy never emits requests on its own,
    /// regardless of app state; use [`StrategyConfig::empty`] to spell that
    /// out for strategies that are purely reactive to other triggers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StrategyConfig: u8 {
        /// May emit requests before the session is authenticated.
        const ALLOW_WHILE_UNAUTHENTICATED = 1 << 0;
        /// May emit requests while the client is catching up on history.
        const ALLOW_DURING_SYNC = 1 << 1;
        /// May emit requests during normal steady-state operation.
        const ALLOW_DURING_EVENT_PROCESSING = 1 << 2;
        /// May emit requests while the application is backgrounded.
        const ALLOW_WHILE_IN_BACKGROUND = 1 << 3;
    }
}

impl StrategyConfig {
    /// Computes the bits a strategy must hold to act right now.
    ///
    /// The app-state mapping is exhaustive and 1:1; a future state must be
    /// given its own bit before any strategy can run in it. Backgrounding
    /// adds [`StrategyConfig::ALLOW_WHILE_IN_BACKGROUND`] on top of the
    /// state bit; in the foreground the mode contributes nothing.
    pub fn prerequisites(state: AppState, mode: OperationMode) -> Self {
        let mut prerequisites = match state {
            AppState::Unauthenticated => Self::ALLOW_WHILE_UNAUTHENTICATED,
            AppState::Syncing => Self::ALLOW_DURING_SYNC,
            AppState::EventProcessing => Self::ALLOW_DURING_EVENT_PROCESSING,
        };

        if mode == OperationMode::Background {
            prerequisites |= Self::ALLOW_WHILE_IN_BACKGROUND;
        }

        prerequisites
    }

    /// Returns true if this mask permits acting in the given state and mode.
    pub fn permits(&self, state: AppState, mode: OperationMode) -> bool {
        self.contains(Self::prerequisites(state, mode))
    }
}
