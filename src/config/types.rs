use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Simulated latencies, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Network increment and retry (default: 1000).
    pub network_ms: u64,
    /// First page load (default: 1500).
    pub load_items_ms: u64,
    /// Next page load (default: 1000).
    pub load_more_ms: u64,
    /// Search execution (default: 500).
    pub search_ms: u64,
    /// Delay before a valid form submission increments (default: 200).
    pub submit_ms: u64,
    /// Conditional increment (default: 500).
    pub conditional_ms: u64,
    /// Chain intent to chain effect (default: 300).
    pub chain_step_ms: u64,
    /// Chain effect to the next chain intent (default: 200).
    pub chain_link_ms: u64,
    /// How long a toast stays visible (default: 2000).
    pub toast_ms: u64,
    /// Search box quiet period before searching (default: 500).
    pub search_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            network_ms: 1000,
            load_items_ms: 1500,
            load_more_ms: 1000,
            search_ms: 500,
            submit_ms: 200,
            conditional_ms: 500,
            chain_step_ms: 300,
            chain_link_ms: 200,
            toast_ms: 2000,
            search_debounce_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn network(&self) -> Duration {
        Duration::from_millis(self.network_ms)
    }

    pub fn load_items(&self) -> Duration {
        Duration::from_millis(self.load_items_ms)
    }

    pub fn load_more(&self) -> Duration {
        Duration::from_millis(self.load_more_ms)
    }

    pub fn search(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }

    pub fn submit(&self) -> Duration {
        Duration::from_millis(self.submit_ms)
    }

    pub fn conditional(&self) -> Duration {
        Duration::from_millis(self.conditional_ms)
    }

    pub fn chain_step(&self) -> Duration {
        Duration::from_millis(self.chain_step_ms)
    }

    pub fn chain_link(&self) -> Duration {
        Duration::from_millis(self.chain_link_ms)
    }

    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Knobs for the simulated backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Probability that a simulated network request fails (default: 0.3).
    pub failure_rate: f64,
    /// Total number of items the fake backend can page through (default: 25).
    pub total_items: usize,
    /// Conditional increment refuses at or above this count (default: 10).
    pub count_limit: i64,
    /// Minimum accepted form input length, in characters (default: 3).
    pub min_input_len: usize,
    /// Seed for the failure generator. Random when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            failure_rate: 0.3,
            total_items: 25,
            count_limit: 10,
            min_input_len: 3,
            seed: None,
        }
    }
}
