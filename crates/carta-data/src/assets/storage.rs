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

//! A keyed, in-memory cache of decoded assets.

use carta_core::asset::{Asset, AssetHandle};
use std::collections::HashMap;

/// A central, in-memory cache for a specific type of asset `A`.
///
/// Entries are keyed by the asset key. Inserting under an existing key
/// replaces the previous entry; handles already given out keep the old data
/// alive until they are dropped.
pub struct AssetCache<A: Asset> {
    storage: HashMap<String, AssetHandle<A>>,
}

impl<A: Asset> Default for AssetCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> Clone for AssetCache<A> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<A: Asset> AssetCache<A> {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Stores `asset` under `key` and returns a handle to it.
    pub fn insert(&mut self, key: impl Into<String>, asset: A) -> AssetHandle<A> {
        let handle = AssetHandle::new(asset);
        self.insert_handle(key, handle.clone());
        handle
    }

    /// Stores an existing handle under `key`.
    pub fn insert_handle(&mut self, key: impl Into<String>, handle: AssetHandle<A>) {
        let key = key.into();
        if self.storage.insert(key.clone(), handle).is_some() {
            log::trace!("Replaced cached asset '{key}'");
        }
    }

    /// Retrieves the handle stored under `key`.
    pub fn get(&self, key: &str) -> Option<&AssetHandle<A>> {
        self.storage.get(key)
    }

    /// Checks if an asset is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    /// Removes and returns the handle stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<AssetHandle<A>> {
        self.storage.remove(key)
    }

    /// Keeps only the entries for which `keep` returns `true` and returns the
    /// keys that were removed.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let evicted: Vec<String> = self
            .storage
            .keys()
            .filter(|key| !keep(key.as_str()))
            .cloned()
            .collect();
        for key in &evicted {
            self.storage.remove(key);
        }
        evicted
    }

    /// Iterates over the stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.storage.keys().map(String::as_str)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.storage.clear();
    }
}
