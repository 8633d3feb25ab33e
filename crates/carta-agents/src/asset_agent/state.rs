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

//! The mutable bookkeeping behind an [`AssetManager`](super::AssetManager).

use carta_core::{
    asset::{AssetData, AssetDefinition, AssetGroup, LoadingStats},
    LoadError,
};
use carta_data::AssetCache;
use futures::future::{BoxFuture, Shared};
use std::collections::{HashMap, HashSet};

/// The settled outcome of one load, shared by every caller that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The asset is in the cache.
    Loaded,
    /// The asset failed or timed out.
    Failed(LoadError),
}

impl LoadOutcome {
    /// Returns `true` for [`LoadOutcome::Loaded`].
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

pub(crate) type SharedLoad = Shared<BoxFuture<'static, LoadOutcome>>;

/// Everything the manager mutates. Guarded by a single mutex that is never
/// held across an await point.
pub(crate) struct LoaderState {
    /// Bumped by every teardown; loads started under an older generation
    /// leave the state untouched when they settle.
    pub(crate) generation: u64,
    /// Every known definition, by key. Last write wins.
    pub(crate) queue: HashMap<String, AssetDefinition>,
    /// Keys of the static catalog, in registration order.
    pub(crate) catalog: Vec<String>,
    /// Keys registered one by one through `register_asset`.
    pub(crate) dynamic: HashSet<String>,
    pub(crate) groups: HashMap<String, AssetGroup>,
    pub(crate) loaded: HashSet<String>,
    pub(crate) failed: HashSet<String>,
    pub(crate) in_flight: HashSet<String>,
    pub(crate) pending: HashMap<String, SharedLoad>,
    /// Failed key -> key of the asset standing in for it.
    pub(crate) substitutions: HashMap<String, String>,
    pub(crate) cache: AssetCache<AssetData>,
}

impl LoaderState {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            queue: HashMap::new(),
            catalog: Vec::new(),
            dynamic: HashSet::new(),
            groups: HashMap::new(),
            loaded: HashSet::new(),
            failed: HashSet::new(),
            in_flight: HashSet::new(),
            pending: HashMap::new(),
            substitutions: HashMap::new(),
            cache: AssetCache::new(),
        }
    }

    /// Puts `definition` in the queue, replacing any definition with the same key.
    pub(crate) fn enqueue(&mut self, definition: AssetDefinition) {
        if let Some(previous) = self.queue.get(&definition.key) {
            if *previous != definition {
                log::warn!(
                    "Asset '{}' redefined ({} -> {}); the new definition wins.",
                    definition.key,
                    previous.path.display(),
                    definition.path.display()
                );
            }
        }
        self.queue.insert(definition.key.clone(), definition);
    }

    /// Returns `true` if `key` is declared by the catalog, by an individual
    /// registration, or by a group other than `except_group`.
    pub(crate) fn is_declared_elsewhere(&self, key: &str, except_group: &str) -> bool {
        self.catalog.iter().any(|k| k == key)
            || self.dynamic.contains(key)
            || self
                .groups
                .values()
                .any(|group| group.name != except_group && group.contains(key))
    }

    pub(crate) fn stats(&self) -> LoadingStats {
        LoadingStats {
            queued: self.queue.len(),
            loaded: self.loaded.len(),
            failed: self.failed.len(),
            in_flight: self.in_flight.len(),
            cached: self.cache.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_core::asset::AssetGroup;

    #[test]
    fn test_enqueue_is_last_write_wins() {
        let mut state = LoaderState::new(0);
        state.enqueue(AssetDefinition::image("tree1", "old/tree1.png"));
        state.enqueue(AssetDefinition::image("tree1", "new/tree1.png"));

        assert_eq!(state.queue.len(), 1);
        assert_eq!(
            state.queue["tree1"].path,
            std::path::Path::new("new/tree1.png")
        );
    }

    #[test]
    fn test_declared_elsewhere() {
        let mut state = LoaderState::new(0);
        state.catalog.push("dialogues".to_string());
        state.groups.insert(
            "forest".to_string(),
            AssetGroup {
                name: "forest".to_string(),
                assets: vec![AssetDefinition::image("tree1", "tree1.png")],
                preload: false,
            },
        );

        assert!(state.is_declared_elsewhere("dialogues", "forest"));
        assert!(state.is_declared_elsewhere("tree1", "desert"));
        assert!(!state.is_declared_elsewhere("tree1", "forest"));
        assert!(!state.is_declared_elsewhere("cactus", "desert"));
    }
}
