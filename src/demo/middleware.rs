//! Middleware for the demo screen: simulated latency and failures.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, SimulationConfig, TimingConfig};
use crate::mvi::{Deferred, Middleware, Reaction};
use crate::scheduler::Scheduler;

use super::effect::{DemoEffect, OperationError};
use super::intent::DemoIntent;
use super::state::{DemoState, ListItem, PAGE_SIZE};

const LOADING_ITEMS: &str = "Loading data...";
const LOADING_MORE: &str = "Loading more...";
const SEARCHING: &str = "Searching...";

/// Decides whether a simulated request fails.
pub struct FaultInjector {
    rate: f64,
    rng: Mutex<StdRng>,
}

impl FaultInjector {
    /// `rate` is clamped to `[0, 1]`. A seed makes the sequence reproducible.
    pub fn new(rate: f64, seed: Option<u64>) -> Self {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rate,
            rng: Mutex::new(rng),
        }
    }

    pub fn never() -> Self {
        Self::new(0.0, Some(0))
    }

    pub fn always() -> Self {
        Self::new(1.0, Some(0))
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn should_fail(&self) -> bool {
        self.rng.lock().gen_bool(self.rate)
    }
}

/// Turns asynchronous demo intents into delayed effects.
#[derive(Clone)]
pub struct DemoMiddleware {
    scheduler: Arc<dyn Scheduler>,
    faults: Arc<FaultInjector>,
    timing: TimingConfig,
    simulation: SimulationConfig,
}

impl DemoMiddleware {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        faults: FaultInjector,
        timing: TimingConfig,
        simulation: SimulationConfig,
    ) -> Self {
        Self {
            scheduler,
            faults: Arc::new(faults),
            timing,
            simulation,
        }
    }

    pub fn from_config(config: &Config, scheduler: Arc<dyn Scheduler>) -> Self {
        let faults = FaultInjector::new(config.simulation.failure_rate, config.simulation.seed);
        Self::new(
            scheduler,
            faults,
            config.timing.clone(),
            config.simulation.clone(),
        )
    }

    pub fn scheduler(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Produce an effect once `delay` has passed on the scheduler.
    fn after<F>(&self, delay: Duration, produce: F) -> Deferred<DemoEffect>
    where
        F: FnOnce() -> DemoEffect + Send + 'static,
    {
        let sleep = self.scheduler.sleep(delay);
        Deferred::new(delay, async move {
            sleep.await;
            produce()
        })
    }

    fn fetch(&self, delay: Duration) -> Deferred<DemoEffect> {
        let faults = Arc::clone(&self.faults);
        self.after(delay, move || {
            if faults.should_fail() {
                OperationError::Network.into_effect()
            } else {
                DemoEffect::DataFetched
            }
        })
    }

    fn load_more(&self, state: &DemoState) -> Reaction<DemoEffect> {
        if !state.has_more_pages || state.is_loading {
            return Reaction::none();
        }

        let start = state.items.len() + 1;
        let end = (start + PAGE_SIZE - 1).min(self.simulation.total_items);
        let deferred = self.after(self.timing.load_more(), move || {
            // Empty once the backend is exhausted.
            DemoEffect::MoreItemsLoaded((start..=end).map(ListItem::numbered).collect())
        });
        Reaction::then(
            DemoEffect::LoadingStarted(Some(LOADING_MORE.to_string())),
            deferred,
        )
    }

    fn search(&self, query: &str, state: &DemoState) -> Reaction<DemoEffect> {
        let query = query.to_string();
        let items = state.items.clone();
        let deferred = self.after(self.timing.search(), move || {
            let results = items.into_iter().filter(|item| item.matches(&query)).collect();
            DemoEffect::SearchCompleted(results)
        });
        Reaction::then(
            DemoEffect::LoadingStarted(Some(SEARCHING.to_string())),
            deferred,
        )
    }

    fn submit(&self, state: &DemoState) -> Reaction<DemoEffect> {
        if let Err(err) = validate_input(&state.input_text, self.simulation.min_input_len) {
            return Reaction::now(err.into_effect());
        }
        let deferred = self.after(self.timing.submit(), || {
            DemoEffect::trigger(DemoIntent::IncrementCount)
        });
        Reaction::then(DemoEffect::LoadingFinished, deferred)
    }

    fn conditional_increment(&self, state: &DemoState) -> Reaction<DemoEffect> {
        let limit = self.simulation.count_limit;
        if state.count >= limit {
            return Reaction::now(OperationError::LimitReached { limit }.into_effect());
        }
        Reaction::later(self.after(self.timing.conditional(), || {
            DemoEffect::ConditionalEffectExecuted
        }))
    }
}

impl Middleware for DemoMiddleware {
    type State = DemoState;
    type Intent = DemoIntent;
    type Effect = DemoEffect;

    fn handle_intent(&self, intent: &DemoIntent, state: &DemoState) -> Reaction<DemoEffect> {
        match intent {
            DemoIntent::IncrementCountFromNetwork => Reaction::later(self.fetch(self.timing.network())),

            DemoIntent::LoadItems => {
                let deferred = self.after(self.timing.load_items(), || {
                    DemoEffect::ItemsLoaded((1..=PAGE_SIZE).map(ListItem::numbered).collect())
                });
                Reaction::then(
                    DemoEffect::LoadingStarted(Some(LOADING_ITEMS.to_string())),
                    deferred,
                )
            }

            DemoIntent::LoadMoreItems => self.load_more(state),

            DemoIntent::PerformSearch(query) => self.search(query, state),

            DemoIntent::SubmitForm => self.submit(state),

            DemoIntent::RetryLastOperation => {
                if state.error_message.is_none() {
                    return Reaction::none();
                }
                Reaction::later(self.after(self.timing.network(), || DemoEffect::DataFetched))
            }

            DemoIntent::ConditionalIncrement => self.conditional_increment(state),

            DemoIntent::StartChainOperation => {
                Reaction::later(self.after(self.timing.chain_step(), || DemoEffect::ChainEffect1))
            }
            DemoIntent::ChainStep1 => {
                Reaction::later(self.after(self.timing.chain_step(), || DemoEffect::ChainEffect2))
            }
            DemoIntent::ChainStep2 => {
                Reaction::later(self.after(self.timing.chain_step(), || DemoEffect::ChainEffect3))
            }

            DemoIntent::IncrementCount
            | DemoIntent::ShowTime
            | DemoIntent::SearchTextChanged(_)
            | DemoIntent::InputTextChanged(_)
            | DemoIntent::ClearError
            | DemoIntent::Undo
            | DemoIntent::Redo
            | DemoIntent::SaveToHistory
            | DemoIntent::ChainStep3 => Reaction::none(),
        }
    }

    fn handle_effect(&self, effect: &DemoEffect, _state: &DemoState) -> Reaction<DemoEffect> {
        match effect {
            DemoEffect::ChainEffect1 => Reaction::later(self.after(self.timing.chain_link(), || {
                DemoEffect::trigger(DemoIntent::ChainStep1)
            })),
            DemoEffect::ChainEffect2 => Reaction::later(self.after(self.timing.chain_link(), || {
                DemoEffect::trigger(DemoIntent::ChainStep2)
            })),
            DemoEffect::ChainEffect3 => Reaction::now(DemoEffect::LoadingFinished),
            _ => Reaction::none(),
        }
    }
}

/// Form validation. Length counts characters, not bytes.
pub fn validate_input(text: &str, min_len: usize) -> Result<(), OperationError> {
    if text.is_empty() {
        return Err(OperationError::EmptyInput);
    }
    if text.chars().count() < min_len {
        return Err(OperationError::InputTooShort { min: min_len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::InstantScheduler;

    fn middleware(faults: FaultInjector) -> DemoMiddleware {
        DemoMiddleware::new(
            Arc::new(InstantScheduler),
            faults,
            TimingConfig::default(),
            SimulationConfig::default(),
        )
    }

    fn loaded(n: usize) -> DemoState {
        DemoState {
            items: (1..=n).map(ListItem::numbered).collect(),
            ..DemoState::default()
        }
    }

    #[tokio::test]
    async fn network_success_fetches_data() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::IncrementCountFromNetwork, &DemoState::default());
        assert!(reaction.immediate.is_none());
        let deferred = reaction.deferred.unwrap();
        assert_eq!(deferred.delay(), Duration::from_millis(1000));
        assert_eq!(deferred.resolve().await, DemoEffect::DataFetched);
    }

    #[tokio::test]
    async fn network_failure_reports_error() {
        let mw = middleware(FaultInjector::always());
        let reaction = mw.handle_intent(&DemoIntent::IncrementCountFromNetwork, &DemoState::default());
        let effect = reaction.deferred.unwrap().resolve().await;
        assert!(matches!(effect, DemoEffect::NetworkError(_)));
    }

    #[tokio::test]
    async fn load_items_starts_loading_then_delivers_first_page() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::LoadItems, &DemoState::default());
        assert_eq!(
            reaction.immediate,
            Some(DemoEffect::LoadingStarted(Some(LOADING_ITEMS.to_string())))
        );
        let deferred = reaction.deferred.unwrap();
        assert_eq!(deferred.delay(), Duration::from_millis(1500));
        match deferred.resolve().await {
            DemoEffect::ItemsLoaded(items) => {
                assert_eq!(items.len(), 10);
                assert_eq!(items[0].id, "item_1");
                assert_eq!(items[9].id, "item_10");
            }
            other => panic!("expected ItemsLoaded, got {other:?}"),
        }
    }

    #[test]
    fn load_more_is_noop_while_loading() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState {
            is_loading: true,
            ..loaded(10)
        };
        assert!(mw.handle_intent(&DemoIntent::LoadMoreItems, &state).is_empty());
    }

    #[test]
    fn load_more_is_noop_without_more_pages() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState {
            has_more_pages: false,
            ..loaded(25)
        };
        assert!(mw.handle_intent(&DemoIntent::LoadMoreItems, &state).is_empty());
    }

    #[tokio::test]
    async fn load_more_stops_at_total() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::LoadMoreItems, &loaded(20));
        assert!(matches!(reaction.immediate, Some(DemoEffect::LoadingStarted(_))));
        match reaction.deferred.unwrap().resolve().await {
            DemoEffect::MoreItemsLoaded(items) => {
                let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
                assert_eq!(ids, ["item_21", "item_22", "item_23", "item_24", "item_25"]);
            }
            other => panic!("expected MoreItemsLoaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_more_past_total_is_empty_page() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::LoadMoreItems, &loaded(25));
        assert_eq!(
            reaction.deferred.unwrap().resolve().await,
            DemoEffect::MoreItemsLoaded(Vec::new())
        );
    }

    #[tokio::test]
    async fn search_filters_captured_items() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::PerformSearch("Item 1".into()), &loaded(12));
        match reaction.deferred.unwrap().resolve().await {
            DemoEffect::SearchCompleted(results) => {
                let ids: Vec<_> = results.iter().map(|i| i.id.as_str()).collect();
                assert_eq!(ids, ["item_1", "item_10", "item_11", "item_12"]);
            }
            other => panic!("expected SearchCompleted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_is_case_sensitive() {
        let mw = middleware(FaultInjector::never());
        for query in ["ITEM 1", "this is"] {
            let reaction = mw.handle_intent(&DemoIntent::PerformSearch(query.into()), &loaded(3));
            assert_eq!(
                reaction.deferred.unwrap().resolve().await,
                DemoEffect::SearchCompleted(Vec::new()),
                "{query:?} should not match"
            );
        }

        let reaction = mw.handle_intent(&DemoIntent::PerformSearch("Item 1".into()), &loaded(3));
        assert_eq!(
            reaction.deferred.unwrap().resolve().await,
            DemoEffect::SearchCompleted(vec![ListItem::numbered(1)])
        );
    }

    #[tokio::test]
    async fn search_matches_subtitle() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::PerformSearch("is item 2".into()), &loaded(3));
        assert_eq!(
            reaction.deferred.unwrap().resolve().await,
            DemoEffect::SearchCompleted(vec![ListItem::numbered(2)])
        );
    }

    #[test]
    fn submit_empty_input_is_validation_error() {
        let mw = middleware(FaultInjector::never());
        let reaction = mw.handle_intent(&DemoIntent::SubmitForm, &DemoState::default());
        assert_eq!(
            reaction.immediate,
            Some(DemoEffect::ValidationError("Input cannot be empty".into()))
        );
        assert!(reaction.deferred.is_none());
    }

    #[test]
    fn submit_short_input_is_validation_error() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState {
            input_text: "ab".into(),
            ..DemoState::default()
        };
        let reaction = mw.handle_intent(&DemoIntent::SubmitForm, &state);
        assert_eq!(
            reaction.immediate,
            Some(DemoEffect::ValidationError(
                "Input must be at least 3 characters".into()
            ))
        );
    }

    #[tokio::test]
    async fn submit_valid_input_triggers_increment() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState {
            input_text: "abc".into(),
            ..DemoState::default()
        };
        let reaction = mw.handle_intent(&DemoIntent::SubmitForm, &state);
        assert_eq!(reaction.immediate, Some(DemoEffect::LoadingFinished));
        assert_eq!(
            reaction.deferred.unwrap().resolve().await,
            DemoEffect::trigger(DemoIntent::IncrementCount)
        );
    }

    #[test]
    fn validation_counts_characters() {
        assert!(validate_input("输入值", 3).is_ok());
        assert_eq!(
            validate_input("é", 3),
            Err(OperationError::InputTooShort { min: 3 })
        );
    }

    #[test]
    fn retry_without_error_is_noop() {
        let mw = middleware(FaultInjector::never());
        assert!(mw
            .handle_intent(&DemoIntent::RetryLastOperation, &DemoState::default())
            .is_empty());
    }

    #[tokio::test]
    async fn retry_after_error_fetches_without_failure() {
        let mw = middleware(FaultInjector::always());
        let state = DemoState {
            error_message: Some("down".into()),
            ..DemoState::default()
        };
        let reaction = mw.handle_intent(&DemoIntent::RetryLastOperation, &state);
        assert_eq!(reaction.deferred.unwrap().resolve().await, DemoEffect::DataFetched);
    }

    #[test]
    fn conditional_at_limit_fails_immediately() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState {
            count: 10,
            ..DemoState::default()
        };
        let reaction = mw.handle_intent(&DemoIntent::ConditionalIncrement, &state);
        assert!(matches!(reaction.immediate, Some(DemoEffect::OperationFailed(_))));
        assert!(reaction.deferred.is_none());
    }

    #[tokio::test]
    async fn conditional_below_limit_executes() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState {
            count: 9,
            ..DemoState::default()
        };
        let reaction = mw.handle_intent(&DemoIntent::ConditionalIncrement, &state);
        let deferred = reaction.deferred.unwrap();
        assert_eq!(deferred.delay(), Duration::from_millis(500));
        assert_eq!(deferred.resolve().await, DemoEffect::ConditionalEffectExecuted);
    }

    #[tokio::test]
    async fn chain_intents_step_through_effects() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState::default();
        let steps = [
            (DemoIntent::StartChainOperation, DemoEffect::ChainEffect1),
            (DemoIntent::ChainStep1, DemoEffect::ChainEffect2),
            (DemoIntent::ChainStep2, DemoEffect::ChainEffect3),
        ];
        for (intent, expected) in steps {
            let deferred = mw.handle_intent(&intent, &state).deferred.unwrap();
            assert_eq!(deferred.delay(), Duration::from_millis(300));
            assert_eq!(deferred.resolve().await, expected);
        }
        assert!(mw.handle_intent(&DemoIntent::ChainStep3, &state).is_empty());
    }

    #[tokio::test]
    async fn chain_effects_link_to_next_step() {
        let mw = middleware(FaultInjector::never());
        let state = DemoState::default();

        let next = mw.handle_effect(&DemoEffect::ChainEffect1, &state).deferred.unwrap();
        assert_eq!(next.delay(), Duration::from_millis(200));
        assert_eq!(next.resolve().await, DemoEffect::trigger(DemoIntent::ChainStep1));

        let next = mw.handle_effect(&DemoEffect::ChainEffect2, &state).deferred.unwrap();
        assert_eq!(next.resolve().await, DemoEffect::trigger(DemoIntent::ChainStep2));

        let last = mw.handle_effect(&DemoEffect::ChainEffect3, &state);
        assert_eq!(last.immediate, Some(DemoEffect::LoadingFinished));
        assert!(last.deferred.is_none());

        assert!(mw.handle_effect(&DemoEffect::LoadingFinished, &state).is_empty());
    }

    #[test]
    fn synchronous_intents_produce_nothing() {
        let mw = middleware(FaultInjector::never());
        assert!(mw
            .handle_intent(&DemoIntent::IncrementCount, &DemoState::default())
            .is_empty());
    }

    #[test]
    fn seeded_faults_repeat() {
        let a = FaultInjector::new(0.5, Some(7));
        let b = FaultInjector::new(0.5, Some(7));
        let first: Vec<bool> = (0..16).map(|_| a.should_fail()).collect();
        let second: Vec<bool> = (0..16).map(|_| b.should_fail()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fault_rate_is_clamped() {
        assert_eq!(FaultInjector::new(3.0, Some(1)).rate(), 1.0);
        assert_eq!(FaultInjector::new(-1.0, Some(1)).rate(), 0.0);
        assert_eq!(FaultInjector::new(f64::NAN, Some(1)).rate(), 0.0);
    }
}
