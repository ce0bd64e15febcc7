//! Reducer for the demo screen.

use std::sync::Arc;

use chrono::{Local, NaiveTime};

use crate::mvi::Reducer;

use super::effect::DemoEffect;
use super::intent::DemoIntent;
use super::state::{DemoState, MAX_HISTORY, PAGE_SIZE};

/// Reducer for demo screen state transitions.
pub struct DemoReducer;

impl Reducer for DemoReducer {
    type State = DemoState;
    type Intent = DemoIntent;
    type Effect = DemoEffect;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        Self::reduce_at(state, intent, Local::now().time())
    }

    fn reduce_effect(state: Self::State, effect: Self::Effect) -> Self::State {
        match effect {
            DemoEffect::ItemsLoaded(items) => DemoState {
                has_more_pages: items.len() >= PAGE_SIZE,
                items,
                current_page: 1,
                ..finish_loading(state)
            },

            DemoEffect::MoreItemsLoaded(more) => {
                let mut state = finish_loading(state);
                state.has_more_pages = more.len() >= PAGE_SIZE;
                state.items.extend(more);
                state.current_page += 1;
                state
            }

            DemoEffect::SearchCompleted(results) => DemoState {
                search_results: results,
                ..finish_loading(state)
            },

            DemoEffect::NetworkError(message) | DemoEffect::OperationFailed(message) => {
                DemoState {
                    error_message: Some(message),
                    ..finish_loading(state)
                }
            }

            DemoEffect::ValidationError(message) => DemoState {
                input_error: Some(message),
                ..state
            },

            DemoEffect::LoadingStarted(message) => DemoState {
                is_loading: true,
                loading_message: message,
                error_message: None,
                ..state
            },

            DemoEffect::LoadingFinished => finish_loading(state),

            DemoEffect::StateRestored(restored) => *restored,

            // Continuations are handled by the store.
            DemoEffect::DataFetched
            | DemoEffect::TriggerIntent(_)
            | DemoEffect::ChainEffect1
            | DemoEffect::ChainEffect2
            | DemoEffect::ChainEffect3
            | DemoEffect::StateSaved
            | DemoEffect::ConditionalEffectExecuted => state,
        }
    }
}

impl DemoReducer {
    /// Pure intent reduction with the wall clock passed in.
    ///
    /// Asynchronous intents return the state unchanged.
    pub fn reduce_at(state: DemoState, intent: DemoIntent, now: NaiveTime) -> DemoState {
        match intent {
            DemoIntent::IncrementCount => DemoState {
                count: state.count + 1,
                ..state
            },

            DemoIntent::ShowTime => DemoState {
                toast_message: Some(format_toast_time(now)),
                ..state
            },

            DemoIntent::SearchTextChanged(text) => DemoState {
                search_text: text,
                // Stale until the debounced search lands.
                search_results: Vec::new(),
                ..state
            },

            DemoIntent::InputTextChanged(text) => DemoState {
                input_text: text,
                input_error: None,
                ..state
            },

            DemoIntent::ClearError => DemoState {
                error_message: None,
                ..state
            },

            DemoIntent::Undo => {
                if !state.can_undo() {
                    return state;
                }
                let index = state.history_index - 1;
                state.restore_from_history(index)
            }

            DemoIntent::Redo => {
                if !state.can_redo() {
                    return state;
                }
                let index = state.history_index + 1;
                state.restore_from_history(index)
            }

            DemoIntent::SaveToHistory => save_to_history(state),

            DemoIntent::IncrementCountFromNetwork
            | DemoIntent::LoadItems
            | DemoIntent::LoadMoreItems
            | DemoIntent::PerformSearch(_)
            | DemoIntent::SubmitForm
            | DemoIntent::RetryLastOperation
            | DemoIntent::ConditionalIncrement
            | DemoIntent::StartChainOperation
            | DemoIntent::ChainStep1
            | DemoIntent::ChainStep2
            | DemoIntent::ChainStep3 => state,
        }
    }
}

/// Toast text for `ShowTime`, e.g. `9点5分7秒`.
pub fn format_toast_time(now: NaiveTime) -> String {
    now.format("%-H点%-M分%-S秒").to_string()
}

fn finish_loading(state: DemoState) -> DemoState {
    DemoState {
        is_loading: false,
        loading_message: None,
        ..state
    }
}

fn save_to_history(mut state: DemoState) -> DemoState {
    // Drop the redo branch.
    let keep = usize::try_from(state.history_index + 1).unwrap_or(0);
    state.history.truncate(keep);
    let snapshot = Arc::new(state.snapshot());
    state.history.push(snapshot);

    if state.history.len() > MAX_HISTORY {
        let overflow = state.history.len() - MAX_HISTORY;
        state.history.drain(..overflow);
    }

    state.history_index = state.history.len() as i32 - 1;
    state
}
