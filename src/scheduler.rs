//! Time source for simulated latency.
//!
//! Middleware and the store never call `tokio::time` directly; they go
//! through a [`Scheduler`] so tests can swap in a zero-delay one or run
//! under tokio's paused clock.

use std::time::Duration;

use futures_core::future::BoxFuture;

/// Something that can wait for a duration.
pub trait Scheduler: Send + Sync + 'static {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Sleeps on the tokio timer.
///
/// Under `tokio::time::pause()` this becomes a deterministic virtual clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Resolves every sleep immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantScheduler;

impl Scheduler for InstantScheduler {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(std::future::ready(()))
    }
}
