// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tunables of the asset manager.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of simultaneous in-flight loads.
pub const DEFAULT_MAX_CONCURRENT_LOADS: usize = 4;
/// Default per-asset load budget, in milliseconds.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;
/// Default delay between two checks for a free load slot, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
/// Default edge length of drawn placeholders, in pixels.
pub const DEFAULT_FALLBACK_TEXTURE_SIZE: u32 = 32;

/// Keys that survive every cleanup sweep unless the configuration says otherwise.
pub const DEFAULT_ALWAYS_KEEP: &[&str] = &[
    "isa_happy",
    "stev_happy",
    "grass_middle",
    "dialogues",
    "fallback_terrain",
    "fallback_entity",
    "fallback_decoration",
];

/// Configuration of an asset manager.
///
/// Every field has a default, so a config file only needs to list what it
/// overrides:
///
/// ```
/// use carta_core::LoaderConfig;
///
/// let config: LoaderConfig = serde_json::from_str(r#"{ "max_concurrent_loads": 8 }"#).unwrap();
/// assert_eq!(config.max_concurrent_loads, 8);
/// assert_eq!(config.load_timeout().as_secs(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum number of keys fetched at the same time.
    pub max_concurrent_loads: usize,
    /// Budget of a single fetch, in milliseconds.
    pub load_timeout_ms: u64,
    /// Delay between two checks for a free slot, in milliseconds.
    pub poll_interval_ms: u64,
    /// Edge length of drawn placeholders, in pixels.
    pub fallback_texture_size: u32,
    /// Keys never evicted by a cleanup sweep.
    pub always_keep: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent_loads: DEFAULT_MAX_CONCURRENT_LOADS,
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            fallback_texture_size: DEFAULT_FALLBACK_TEXTURE_SIZE,
            always_keep: DEFAULT_ALWAYS_KEEP.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl LoaderConfig {
    /// The per-fetch budget.
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// The slot polling interval, never shorter than one millisecond.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// The concurrency limit, never below one.
    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrent_loads.max(1)
    }

    /// Returns `true` if `key` is protected from eviction.
    pub fn is_always_kept(&self, key: &str) -> bool {
        self.always_keep.iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_loader_contract() {
        let config = LoaderConfig::default();
        assert_eq!(config.concurrency_limit(), 4);
        assert_eq!(config.load_timeout(), Duration::from_secs(10));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.fallback_texture_size, 32);
        assert!(config.is_always_kept("dialogues"));
        assert!(!config.is_always_kept("tree1"));
    }

    #[test]
    fn test_degenerate_values_are_clamped() {
        let config = LoaderConfig {
            max_concurrent_loads: 0,
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.concurrency_limit(), 1);
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_partial_ron_override() {
        let config: LoaderConfig = ron::from_str("(load_timeout_ms: 2500)").unwrap();
        assert_eq!(config.load_timeout(), Duration::from_millis(2500));
        assert_eq!(config.max_concurrent_loads, DEFAULT_MAX_CONCURRENT_LOADS);
    }
}
