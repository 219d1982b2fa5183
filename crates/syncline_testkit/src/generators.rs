//! Property-based generators using proptest.

use proptest::prelude::*;
use syncline_strategy::{AppState, OperationMode, StrategyConfig};

/// Generates any app state.
pub fn app_state() -> impl Strategy<Value = AppState> {
    prop_oneof![
        Just(AppState::Unauthenticated),
        Just(AppState::Syncing),
        Just(AppState::EventProcessing),
    ]
}

/// Generates any operation mode.
pub fn operation_mode() -> impl Strategy<Value = OperationMode> {
    prop_oneof![
        Just(OperationMode::Foreground),
        Just(OperationMode::Background),
    ]
}

/// Generates any permission mask, the empty one included.
pub fn strategy_config() -> impl Strategy<Value = StrategyConfig> {
    (0..=StrategyConfig::all().bits()).prop_map(StrategyConfig::from_bits_truncate)
}
