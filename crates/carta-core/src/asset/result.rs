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

use std::fmt;

/// A recorded replacement of a failed asset by another one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FallbackSubstitution {
    /// The asset that failed.
    pub key: String,
    /// The asset standing in for it.
    pub fallback: String,
}

impl FallbackSubstitution {
    /// Creates a substitution record.
    pub fn new(key: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fallback: fallback.into(),
        }
    }
}

impl fmt::Display for FallbackSubstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.key, self.fallback)
    }
}

/// The outcome of one bulk load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
    /// `false` if a required asset ended up with no usable resolution.
    pub success: bool,
    /// Keys that loaded, in catalog order.
    pub loaded_assets: Vec<String>,
    /// Keys that failed or timed out, in catalog order.
    pub failed_assets: Vec<String>,
    /// Substitutions applied to failed assets.
    pub fallbacks_used: Vec<FallbackSubstitution>,
}

impl LoadResult {
    /// Returns `true` if `key` was substituted by `fallback`.
    pub fn used_fallback(&self, key: &str, fallback: &str) -> bool {
        self.fallbacks_used
            .iter()
            .any(|sub| sub.key == key && sub.fallback == fallback)
    }
}

/// A snapshot of the loader's bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingStats {
    /// Definitions in the load queue.
    pub queued: usize,
    /// Keys marked loaded.
    pub loaded: usize,
    /// Keys marked failed.
    pub failed: usize,
    /// Keys currently being fetched.
    pub in_flight: usize,
    /// Entries in the cache, placeholders included.
    pub cached: usize,
}
