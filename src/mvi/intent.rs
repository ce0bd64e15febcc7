//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button clicks, key presses)
/// - System events (timers, effect follow-ups)
///
/// Intents are processed by reducers or middleware to produce new states.
pub trait Intent: Clone + Send + 'static {}
