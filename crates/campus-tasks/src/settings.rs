//! Search input settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default debounce window for search inputs
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Largest accepted debounce window
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Search input configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
	/// Quiet period before a search is sent, in milliseconds
	pub debounce_ms: u64,
}

impl SearchSettings {
	/// Debounce window as a duration
	pub fn window(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
		}
	}
}
