//! The demo screen feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Screen state and list items
//! - `intent.rs` - User/system actions
//! - `effect.rs` - Asynchronous results and reportable errors
//! - `reducer.rs` - State transitions
//! - `middleware.rs` - Simulated latency and failures
//! - `store.rs` - Single owner of the state, dispatch loop

mod effect;
mod intent;
mod middleware;
mod reducer;
mod state;
mod store;

pub use effect::{DemoEffect, OperationError};
pub use intent::{DemoIntent, ParseIntentError};
pub use middleware::{validate_input, DemoMiddleware, FaultInjector};
pub use reducer::{format_toast_time, DemoReducer};
pub use state::{DemoState, ListItem, MAX_HISTORY, PAGE_SIZE};
pub use store::{Store, StoreEvent, StoreHandle};
