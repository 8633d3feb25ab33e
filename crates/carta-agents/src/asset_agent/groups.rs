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

//! Named groups and biome families for staged loading.

use super::manager::AssetManager;
use carta_core::{
    asset::{AssetDefinition, AssetGroup, BiomeAssetTemplate},
    AssetError, LoadError,
};
use futures::future::join_all;

impl AssetManager {
    /// Registers a named, ordered group and enqueues each of its definitions.
    ///
    /// Defining an existing name replaces its member list. Keys of the old
    /// list that the new list does not re-declare are dropped from the queue
    /// unless the catalog, an individual registration or another group still
    /// declares them.
    ///
    /// # Errors
    /// Returns the first validation error; the registry is left untouched.
    pub fn define_asset_group(
        &self,
        name: &str,
        assets: Vec<AssetDefinition>,
        preload: bool,
    ) -> Result<(), AssetError> {
        for definition in &assets {
            definition.validate()?;
        }

        let group = AssetGroup {
            name: name.to_string(),
            assets,
            preload,
        };

        let mut state = self.lock();
        for definition in &group.assets {
            state.enqueue(definition.clone());
        }

        if let Some(previous) = state.groups.remove(name) {
            let orphaned: Vec<&str> = previous
                .keys()
                .filter(|key| !group.contains(key) && !state.is_declared_elsewhere(key, name))
                .collect();
            for key in &orphaned {
                state.queue.remove(*key);
            }
            log::debug!(
                "Group '{name}' redefined, {} orphaned key(s) dropped from the queue",
                orphaned.len()
            );
        }

        log::debug!(
            "Defined group '{name}' with {} asset(s) (preload: {preload})",
            group.assets.len()
        );
        state.groups.insert(name.to_string(), group);
        Ok(())
    }

    /// Returns a copy of the group registered under `name`.
    pub fn group(&self, name: &str) -> Option<AssetGroup> {
        self.lock().groups.get(name).cloned()
    }

    /// Loads every member of `name` that is not loaded yet, all in parallel.
    ///
    /// An unknown group name is logged and ignored.
    ///
    /// # Errors
    /// After every member has settled, returns the first error propagated by
    /// [`load_asset`](Self::load_asset), in member order.
    pub async fn load_asset_group(&self, name: &str) -> Result<(), LoadError> {
        let keys: Vec<String> = {
            let state = self.lock();
            let Some(group) = state.groups.get(name) else {
                log::warn!("Asset group '{name}' is not defined, nothing to load");
                return Ok(());
            };
            group
                .keys()
                .filter(|key| !state.loaded.contains(*key))
                .map(str::to_string)
                .collect()
        };

        log::debug!("Loading {} pending asset(s) of group '{name}'", keys.len());
        let results = join_all(keys.iter().map(|key| self.load_asset(key))).await;
        results.into_iter().collect()
    }

    /// Loads every group flagged `preload`, one group after the other in name
    /// order.
    ///
    /// # Errors
    /// Stops at the first group that propagates an error.
    pub async fn preload_groups(&self) -> Result<(), LoadError> {
        let mut names: Vec<String> = self
            .lock()
            .groups
            .values()
            .filter(|group| group.preload)
            .map(|group| group.name.clone())
            .collect();
        names.sort();

        for name in names {
            self.load_asset_group(&name).await?;
        }
        Ok(())
    }

    /// Expands `templates` into a `biome_<biome>` group and loads it.
    ///
    /// Returns the keys of the synthesized definitions.
    ///
    /// # Errors
    /// [`LoadError::Invalid`] if a template expands into an invalid
    /// definition, otherwise whatever [`load_asset_group`](Self::load_asset_group)
    /// propagates.
    pub async fn load_biome_assets(
        &self,
        biome: &str,
        templates: &[BiomeAssetTemplate],
    ) -> Result<Vec<String>, LoadError> {
        let definitions: Vec<AssetDefinition> =
            templates.iter().flat_map(BiomeAssetTemplate::expand).collect();
        let keys = definitions.iter().map(|def| def.key.clone()).collect();

        let group_name = format!("biome_{biome}");
        self.define_asset_group(&group_name, definitions, false)
            .map_err(|source| LoadError::Invalid {
                key: group_name.clone(),
                source,
            })?;

        log::info!(
            "Loading biome '{biome}' from {} template(s)",
            templates.len()
        );
        self.load_asset_group(&group_name).await?;
        Ok(keys)
    }
}
