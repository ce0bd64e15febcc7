//! Middleware trait and its reaction type.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures_core::future::BoxFuture;

use super::effect::Effect;
use super::intent::Intent;
use super::state::UiState;

/// An effect that resolves after a delay.
pub struct Deferred<E> {
    delay: Duration,
    future: BoxFuture<'static, E>,
}

impl<E> Deferred<E> {
    pub fn new<F>(delay: Duration, future: F) -> Self
    where
        F: Future<Output = E> + Send + 'static,
    {
        Self {
            delay,
            future: Box::pin(future),
        }
    }

    /// The simulated latency before the effect is produced.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the effect.
    pub async fn resolve(self) -> E {
        self.future.await
    }
}

impl<E> fmt::Debug for Deferred<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// What a middleware produced for one intent or effect.
///
/// The immediate effect (if any) is applied before the deferred one
/// starts counting down.
#[derive(Debug)]
pub struct Reaction<E> {
    pub immediate: Option<E>,
    pub deferred: Option<Deferred<E>>,
}

impl<E> Reaction<E> {
    /// Nothing to do.
    pub fn none() -> Self {
        Self {
            immediate: None,
            deferred: None,
        }
    }

    pub fn now(effect: E) -> Self {
        Self {
            immediate: Some(effect),
            deferred: None,
        }
    }

    pub fn later(deferred: Deferred<E>) -> Self {
        Self {
            immediate: None,
            deferred: Some(deferred),
        }
    }

    /// Immediate effect followed by a deferred one.
    pub fn then(effect: E, deferred: Deferred<E>) -> Self {
        Self {
            immediate: Some(effect),
            deferred: Some(deferred),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.immediate.is_none() && self.deferred.is_none()
    }
}

/// Middleware translates intents into effects.
///
/// Implementations never touch shared state: they read the snapshot they
/// are given and describe what should happen.
pub trait Middleware: Send + Sync + 'static {
    type State: UiState;
    type Intent: Intent;
    type Effect: Effect;

    /// React to an asynchronous intent.
    fn handle_intent(&self, intent: &Self::Intent, state: &Self::State) -> Reaction<Self::Effect>;

    /// React to an effect that continues a chain.
    fn handle_effect(&self, effect: &Self::Effect, state: &Self::State) -> Reaction<Self::Effect>;
}
