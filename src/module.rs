//! Registration of the demo screen with a [`ModuleRegistry`].

use std::sync::Arc;

use crate::config::Config;
use crate::demo::{DemoMiddleware, DemoState, Store, StoreHandle};
use crate::registry::ModuleRegistry;
use crate::scheduler::Scheduler;

/// Capability a module publishes so a host can open its screen.
pub trait ScreenProvider: Send + Sync {
    /// Human-readable screen name.
    fn title(&self) -> &str;

    /// Start a fresh store for the screen and hand back its controller.
    fn open_screen(&self) -> StoreHandle;
}

/// Opens demo screens backed by the simulated middleware.
pub struct DemoScreenProvider {
    config: Config,
    scheduler: Arc<dyn Scheduler>,
}

impl DemoScreenProvider {
    pub fn new(config: Config, scheduler: Arc<dyn Scheduler>) -> Self {
        Self { config, scheduler }
    }
}

impl ScreenProvider for DemoScreenProvider {
    fn title(&self) -> &str {
        "MVI demo"
    }

    fn open_screen(&self) -> StoreHandle {
        let middleware = DemoMiddleware::from_config(&self.config, Arc::clone(&self.scheduler));
        Store::spawn(DemoState::default(), middleware)
    }
}

/// The demo module's entry point for hosts.
pub struct DemoModule;

impl DemoModule {
    /// Registry key of the demo [`ScreenProvider`].
    pub const SCREEN_KEY: &'static str = "intentloop.demo.screen";

    pub fn register_services(registry: &ModuleRegistry, config: &Config, scheduler: Arc<dyn Scheduler>) {
        let provider: Arc<dyn ScreenProvider> =
            Arc::new(DemoScreenProvider::new(config.clone(), scheduler));
        registry.register(Self::SCREEN_KEY, provider);
    }
}

/// Resolve the provider under `key` and open its screen.
///
/// A missing provider is logged and yields `None`; the host should show
/// nothing rather than fail.
pub fn present_screen(registry: &ModuleRegistry, key: &str) -> Option<StoreHandle> {
    let Some(provider) = registry.resolve::<Arc<dyn ScreenProvider>>(key) else {
        tracing::warn!(key = %key, "No screen provider registered; skipping presentation");
        return None;
    };
    tracing::info!(key = %key, title = provider.title(), "Presenting screen");
    Some(provider.open_screen())
}
