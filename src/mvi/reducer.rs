//! Reducer trait for MVI architecture.

use super::effect::Effect;
use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents and effects.
///
/// The reducer is the only place where state transitions happen.
/// Both entry points must be pure functions: (State, Input) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// The effect type this reducer folds back into state.
    type Effect: Effect;

    /// Process an intent and return the new state.
    ///
    /// Intents the reducer does not own (asynchronous ones) must return
    /// the state unchanged.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Apply the result of an asynchronous operation.
    fn reduce_effect(state: Self::State, effect: Self::Effect) -> Self::State;
}
