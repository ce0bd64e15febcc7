//! Base trait for effects in MVI architecture.

/// Marker trait for effect objects.
///
/// Effects carry the outcome of asynchronous work (loaded data, errors,
/// follow-up intents) back to the reducer.
pub trait Effect: Clone + Send + 'static {}
