pub mod config;
pub mod demo;
pub mod logging;
pub mod module;
pub mod mvi;
pub mod registry;
pub mod scheduler;
pub mod script;
