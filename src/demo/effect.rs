//! Effects for the demo screen and the errors they report.

use thiserror::Error;

use crate::mvi::Effect;

use super::intent::DemoIntent;
use super::state::{DemoState, ListItem};

/// Results of asynchronous work, folded back into [`DemoState`].
#[derive(Debug, Clone, PartialEq)]
pub enum DemoEffect {
    /// Simulated request succeeded; the store increments the counter.
    DataFetched,

    ItemsLoaded(Vec<ListItem>),
    MoreItemsLoaded(Vec<ListItem>),
    SearchCompleted(Vec<ListItem>),

    NetworkError(String),
    ValidationError(String),
    OperationFailed(String),

    LoadingStarted(Option<String>),
    LoadingFinished,

    /// Feed an intent back into the store.
    TriggerIntent(Box<DemoIntent>),

    ChainEffect1,
    ChainEffect2,
    ChainEffect3,

    StateSaved,
    /// Replace the whole state.
    StateRestored(Box<DemoState>),

    /// Conditional increment passed its check; the store increments.
    ConditionalEffectExecuted,
}

impl Effect for DemoEffect {}

impl DemoEffect {
    pub fn trigger(intent: DemoIntent) -> Self {
        DemoEffect::TriggerIntent(Box::new(intent))
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DemoEffect::DataFetched => "data_fetched",
            DemoEffect::ItemsLoaded(_) => "items_loaded",
            DemoEffect::MoreItemsLoaded(_) => "more_items_loaded",
            DemoEffect::SearchCompleted(_) => "search_completed",
            DemoEffect::NetworkError(_) => "network_error",
            DemoEffect::ValidationError(_) => "validation_error",
            DemoEffect::OperationFailed(_) => "operation_failed",
            DemoEffect::LoadingStarted(_) => "loading_started",
            DemoEffect::LoadingFinished => "loading_finished",
            DemoEffect::TriggerIntent(_) => "trigger_intent",
            DemoEffect::ChainEffect1 => "chain_effect_1",
            DemoEffect::ChainEffect2 => "chain_effect_2",
            DemoEffect::ChainEffect3 => "chain_effect_3",
            DemoEffect::StateSaved => "state_saved",
            DemoEffect::StateRestored(_) => "state_restored",
            DemoEffect::ConditionalEffectExecuted => "conditional_effect_executed",
        }
    }

    /// True for the effects the middleware continues via `handle_effect`.
    pub fn is_chain(&self) -> bool {
        matches!(
            self,
            DemoEffect::ChainEffect1 | DemoEffect::ChainEffect2 | DemoEffect::ChainEffect3
        )
    }
}

/// Recoverable failures reported into state. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("Input cannot be empty")]
    EmptyInput,

    #[error("Input must be at least {min} characters")]
    InputTooShort { min: usize },

    #[error("Network request failed, please try again later")]
    Network,

    #[error("Counter has reached its limit of {limit}")]
    LimitReached { limit: i64 },
}

impl OperationError {
    /// The effect that reports this error.
    pub fn into_effect(self) -> DemoEffect {
        let message = self.to_string();
        match self {
            OperationError::EmptyInput | OperationError::InputTooShort { .. } => {
                DemoEffect::ValidationError(message)
            }
            OperationError::Network => DemoEffect::NetworkError(message),
            OperationError::LimitReached { .. } => DemoEffect::OperationFailed(message),
        }
    }
}
