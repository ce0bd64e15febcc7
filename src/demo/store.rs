//! Store for the demo screen.
//!
//! The store runs as a single tokio task that owns [`DemoState`]. Everything
//! that wants to change state posts a message into its inbox: intents from
//! [`StoreHandle::dispatch`], effects from deferred middleware work, and
//! timer follow-ups (toast expiry, debounced search). Nothing else can
//! reach the state, so there are no locks.
//!
//! Observers read the latest state through [`StoreHandle::subscribe`], or
//! receive every replacement in order through [`StoreHandle::changes`].
//!
//! Deferred work captures the state at dispatch time. Two overlapping
//! operations may therefore both act on a stale snapshot; the later one to
//! resolve wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::mvi::{Deferred, Middleware, Reaction, Reducer};
use crate::scheduler::Scheduler;

use super::effect::DemoEffect;
use super::intent::DemoIntent;
use super::middleware::DemoMiddleware;
use super::reducer::DemoReducer;
use super::state::DemoState;

const EVENT_CHANNEL_SIZE: usize = 256;
const CHANGE_CHANNEL_SIZE: usize = 256;

/// What the store processed, in order. Broadcast to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Intent(DemoIntent),
    Effect(DemoEffect),
}

enum Message {
    Intent(DemoIntent),
    Effect(DemoEffect),
    ClearToast,
}

/// Cheap, cloneable access to a running store.
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::UnboundedSender<Message>,
    state: watch::Receiver<DemoState>,
    changes: broadcast::Sender<DemoState>,
    events: broadcast::Sender<StoreEvent>,
}

impl StoreHandle {
    /// Fire-and-forget. State changes become visible through
    /// [`subscribe`](Self::subscribe) and [`changes`](Self::changes) once the store has processed the intent.
    pub fn dispatch(&self, intent: DemoIntent) {
        if self.sender.send(Message::Intent(intent)).is_err() {
            tracing::warn!("Store: intent dropped (store stopped)");
        }
    }

    /// The latest published state.
    pub fn state(&self) -> DemoState {
        self.state.borrow().clone()
    }

    /// Latest-value receiver. Replacements that land between two polls
    /// collapse into the newest one.
    pub fn subscribe(&self) -> watch::Receiver<DemoState> {
        self.state.clone()
    }

    /// Every state replacement from now on, in order.
    ///
    /// A receiver that falls more than 256 states behind gets
    /// `RecvError::Lagged` instead of a silent gap.
    pub fn changes(&self) -> broadcast::Receiver<DemoState> {
        self.changes.subscribe()
    }

    /// Trace of intents and effects processed from now on.
    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

/// The single owner of [`DemoState`].
pub struct Store {
    state: DemoState,
    middleware: DemoMiddleware,
    scheduler: Arc<dyn Scheduler>,
    toast_duration: Duration,
    search_debounce: Duration,
    inbox: mpsc::UnboundedReceiver<Message>,
    /// Weak so the store stops once every handle is gone.
    outbox: mpsc::WeakUnboundedSender<Message>,
    published: watch::Sender<DemoState>,
    changes: broadcast::Sender<DemoState>,
    events: broadcast::Sender<StoreEvent>,
    pending_search: Option<JoinHandle<()>>,
}

impl Store {
    /// Start a store on the current tokio runtime.
    pub fn spawn(initial: DemoState, middleware: DemoMiddleware) -> StoreHandle {
        let (sender, inbox) = mpsc::unbounded_channel();
        let (published, state) = watch::channel(initial.clone());
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_SIZE);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);

        let store = Store {
            state: initial,
            scheduler: middleware.scheduler(),
            toast_duration: middleware.timing().toast(),
            search_debounce: middleware.timing().search_debounce(),
            middleware,
            inbox,
            outbox: sender.downgrade(),
            published,
            changes: changes.clone(),
            events: events.clone(),
            pending_search: None,
        };
        tokio::spawn(store.run());

        StoreHandle {
            sender,
            state,
            changes,
            events,
        }
    }

    async fn run(mut self) {
        tracing::debug!("Store started");
        while let Some(message) = self.inbox.recv().await {
            match message {
                Message::Intent(intent) => self.handle_intent(intent),
                Message::Effect(effect) => self.handle_effect(effect),
                Message::ClearToast => {
                    let state = std::mem::take(&mut self.state);
                    self.replace(DemoState {
                        toast_message: None,
                        ..state
                    });
                }
            }
        }
        if let Some(pending) = self.pending_search.take() {
            pending.abort();
        }
        tracing::debug!("Store stopped");
    }

    fn handle_intent(&mut self, intent: DemoIntent) {
        tracing::debug!(intent = %intent, sync = intent.is_synchronous(), "Store: dispatch");
        self.emit(StoreEvent::Intent(intent.clone()));

        if !intent.is_synchronous() {
            let reaction = self.middleware.handle_intent(&intent, &self.state);
            self.run_reaction(reaction);
            return;
        }

        self.apply_intent(intent.clone());
        match intent {
            DemoIntent::ShowTime => {
                // Each toast schedules its own clear; an older timer may
                // clear a newer toast.
                self.post_after(self.toast_duration, Message::ClearToast);
            }
            DemoIntent::SearchTextChanged(text) => self.debounce_search(text),
            _ => {}
        }
    }

    fn handle_effect(&mut self, effect: DemoEffect) {
        tracing::trace!(effect = effect.name(), "Store: apply effect");
        self.emit(StoreEvent::Effect(effect.clone()));
        self.apply_effect(effect.clone());

        match effect {
            DemoEffect::TriggerIntent(intent) => self.handle_intent(*intent),
            DemoEffect::DataFetched | DemoEffect::ConditionalEffectExecuted => {
                self.apply_intent(DemoIntent::IncrementCount);
            }
            chain if chain.is_chain() => {
                let reaction = self.middleware.handle_effect(&chain, &self.state);
                self.run_reaction(reaction);
            }
            _ => {}
        }
    }

    fn run_reaction(&mut self, reaction: Reaction<DemoEffect>) {
        if let Some(effect) = reaction.immediate {
            self.handle_effect(effect);
        }
        if let Some(deferred) = reaction.deferred {
            self.spawn_deferred(deferred);
        }
    }

    fn spawn_deferred(&self, deferred: Deferred<DemoEffect>) {
        let Some(sender) = self.outbox.upgrade() else {
            tracing::trace!("Store: deferred effect skipped (no handles left)");
            return;
        };
        tracing::trace!(delay_ms = deferred.delay().as_millis() as u64, "Store: deferred effect scheduled");
        tokio::spawn(async move {
            let effect = deferred.resolve().await;
            if sender.send(Message::Effect(effect)).is_err() {
                tracing::trace!("Store: deferred effect dropped (store stopped)");
            }
        });
    }

    /// Cancel any pending search and schedule a new one for non-empty text.
    fn debounce_search(&mut self, text: String) {
        if let Some(pending) = self.pending_search.take() {
            pending.abort();
        }
        if text.is_empty() {
            return;
        }
        self.pending_search = self.post_after(
            self.search_debounce,
            Message::Intent(DemoIntent::PerformSearch(text)),
        );
    }

    fn post_after(&self, delay: Duration, message: Message) -> Option<JoinHandle<()>> {
        let sender = self.outbox.upgrade()?;
        let sleep = self.scheduler.sleep(delay);
        Some(tokio::spawn(async move {
            sleep.await;
            if sender.send(message).is_err() {
                tracing::trace!("Store: timer message dropped (store stopped)");
            }
        }))
    }

    fn apply_intent(&mut self, intent: DemoIntent) {
        let state = std::mem::take(&mut self.state);
        self.replace(DemoReducer::reduce(state, intent));
    }

    fn apply_effect(&mut self, effect: DemoEffect) {
        let state = std::mem::take(&mut self.state);
        self.replace(DemoReducer::reduce_effect(state, effect));
    }

    fn replace(&mut self, next: DemoState) {
        self.state = next;
        self.published.send_replace(self.state.clone());
        // No observers is fine.
        let _ = self.changes.send(self.state.clone());
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
