//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow between a screen and its store.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Middleware ──→ Effect ──→ Reducer ──→ State ──→ View
//!    │                        ↑  │                            │
//!    │                        └──┘ (chains)                   │
//!    └──→ Reducer (synchronous intents)                       │
//!    ↑                                                        │
//!    └────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of UI state
//! - **Intent**: User actions or system events
//! - **Effect**: Results of asynchronous work, folded back into state
//! - **Reducer**: Pure function that transforms state based on intents and effects
//! - **Middleware**: Turns intents into (possibly delayed) effects

mod effect;
mod intent;
mod middleware;
mod reducer;
mod state;

pub use effect::Effect;
pub use intent::Intent;
pub use middleware::{Deferred, Middleware, Reaction};
pub use reducer::Reducer;
pub use state::UiState;
