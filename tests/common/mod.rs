//! Shared test utilities for store tests.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use intentloop::config::{SimulationConfig, TimingConfig};
use intentloop::demo::{
    DemoEffect, DemoIntent, DemoMiddleware, DemoState, FaultInjector, Store, StoreEvent,
    StoreHandle,
};
use intentloop::scheduler::TokioScheduler;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Store on the tokio clock with default timings.
///
/// Run tests with `#[tokio::test(start_paused = true)]` so delays are virtual.
pub fn spawn_store(initial: DemoState, faults: FaultInjector) -> StoreHandle {
    let middleware = DemoMiddleware::new(
        Arc::new(TokioScheduler),
        faults,
        TimingConfig::default(),
        SimulationConfig::default(),
    );
    Store::spawn(initial, middleware)
}

pub fn default_store() -> StoreHandle {
    spawn_store(DemoState::default(), FaultInjector::never())
}

/// Let virtual time pass; everything due by then has been processed.
pub async fn advance(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Let the store drain its inbox without meaningfully moving the clock.
pub async fn settle() {
    advance(1).await;
}

/// Everything queued on `receiver`. Panics if the receiver lagged, since
/// the trace would then have a gap.
pub fn drain<T: Clone>(receiver: &mut broadcast::Receiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(item) => out.push(item),
            Err(TryRecvError::Lagged(skipped)) => {
                panic!("receiver lagged, {skipped} messages lost")
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return out,
        }
    }
}

pub fn effects(events: &[StoreEvent]) -> Vec<DemoEffect> {
    events
        .iter()
        .filter_map(|event| match event {
            StoreEvent::Effect(effect) => Some(effect.clone()),
            StoreEvent::Intent(_) => None,
        })
        .collect()
}

pub fn intents(events: &[StoreEvent]) -> Vec<DemoIntent> {
    events
        .iter()
        .filter_map(|event| match event {
            StoreEvent::Intent(intent) => Some(intent.clone()),
            StoreEvent::Effect(_) => None,
        })
        .collect()
}
