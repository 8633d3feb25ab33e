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

//! The asset manager: load queue, concurrency limiter, cache and teardown.

use super::state::{LoadOutcome, LoaderState, SharedLoad};
use carta_core::{
    asset::{AssetData, AssetDefinition, AssetHandle, FallbackKind, LoadingStats},
    event::{AssetEvent, EventBus},
    AssetError, AssetFetcher, LoadError, LoaderConfig,
};
use carta_io::AssetManifest;
use carta_lanes::FallbackTextureLane;
use futures::FutureExt;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

/// Owns every piece of loading state and drives loads through an
/// [`AssetFetcher`].
///
/// The manager is a cheap, clonable handle; clones share the same state.
/// All mutable bookkeeping sits behind one mutex that is only held for short,
/// synchronous sections, never across an await point.
#[derive(Clone)]
pub struct AssetManager {
    pub(crate) inner: Arc<ManagerInner>,
}

pub(crate) struct ManagerInner {
    pub(crate) config: LoaderConfig,
    pub(crate) fetcher: Arc<dyn AssetFetcher>,
    pub(crate) fallback_lane: FallbackTextureLane,
    pub(crate) state: Mutex<LoaderState>,
    pub(crate) events: EventBus<AssetEvent>,
}

/// What a caller of `load_asset` has to wait for.
enum LoadRequest {
    AlreadyLoaded,
    Pending { load: SharedLoad, essential: bool },
}

impl AssetManager {
    /// Creates a manager with an empty queue and draws the generic
    /// placeholder textures.
    pub fn new(fetcher: Arc<dyn AssetFetcher>, config: LoaderConfig) -> Self {
        let fallback_lane = FallbackTextureLane::new(config.fallback_texture_size);
        let manager = Self {
            inner: Arc::new(ManagerInner {
                config,
                fetcher,
                fallback_lane,
                state: Mutex::new(LoaderState::new(0)),
                events: EventBus::new(),
            }),
        };

        for kind in FallbackKind::GENERIC {
            manager.ensure_fallback_texture(kind);
        }

        log::info!(
            "AssetManager initialized (max {} concurrent loads, {:?} timeout)",
            manager.inner.config.concurrency_limit(),
            manager.inner.config.load_timeout()
        );
        manager
    }

    /// Creates a manager whose static catalog and groups come from `manifest`.
    ///
    /// # Errors
    /// Returns an [`AssetError`] if a definition is invalid.
    pub fn from_manifest(
        fetcher: Arc<dyn AssetFetcher>,
        config: LoaderConfig,
        manifest: &AssetManifest,
    ) -> Result<Self, AssetError> {
        let manager = Self::new(fetcher, config);
        manager.register_catalog(manifest.assets.iter().cloned())?;
        for group in &manifest.groups {
            manager.define_asset_group(&group.name, group.assets.clone(), group.preload)?;
        }
        Ok(manager)
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &LoaderConfig {
        &self.inner.config
    }

    /// Adds definitions to the static catalog loaded by
    /// [`load_all_assets`](Self::load_all_assets).
    ///
    /// Nothing is registered if any definition is invalid.
    ///
    /// # Errors
    /// Returns the first validation error.
    pub fn register_catalog(
        &self,
        definitions: impl IntoIterator<Item = AssetDefinition>,
    ) -> Result<(), AssetError> {
        let definitions: Vec<_> = definitions.into_iter().collect();
        for definition in &definitions {
            definition.validate()?;
        }

        let mut state = self.lock();
        for definition in definitions {
            if !state.catalog.contains(&definition.key) {
                state.catalog.push(definition.key.clone());
            }
            state.enqueue(definition);
        }
        Ok(())
    }

    /// Adds a single definition to the load queue without making it part of
    /// the static catalog. Re-registering a key replaces its definition.
    ///
    /// # Errors
    /// Returns the validation error if the definition is invalid.
    pub fn register_asset(&self, definition: AssetDefinition) -> Result<(), AssetError> {
        definition.validate()?;
        let mut state = self.lock();
        state.dynamic.insert(definition.key.clone());
        state.enqueue(definition);
        Ok(())
    }

    /// Loads one asset.
    ///
    /// Concurrent requests for the same key share a single fetch and observe
    /// the same outcome. An already loaded key resolves immediately.
    ///
    /// Failures of optional assets are recorded in the failed set and
    /// swallowed; failures and timeouts of required or critical assets are
    /// returned.
    ///
    /// # Errors
    /// [`LoadError::UnknownAsset`] if the key was never registered, otherwise
    /// the load error of an essential asset.
    pub async fn load_asset(&self, key: &str) -> Result<(), LoadError> {
        match self.request(key)? {
            LoadRequest::AlreadyLoaded => Ok(()),
            LoadRequest::Pending { load, essential } => match load.await {
                LoadOutcome::Loaded => Ok(()),
                LoadOutcome::Failed(error) if essential => Err(error),
                LoadOutcome::Failed(_) => Ok(()),
            },
        }
    }

    /// Loads one asset and reports its outcome without applying the
    /// essential/optional error policy.
    pub async fn load_tracked(&self, key: &str) -> LoadOutcome {
        match self.request(key) {
            Ok(LoadRequest::AlreadyLoaded) => LoadOutcome::Loaded,
            Ok(LoadRequest::Pending { load, .. }) => load.await,
            Err(error) => LoadOutcome::Failed(error),
        }
    }

    fn request(&self, key: &str) -> Result<LoadRequest, LoadError> {
        let mut state = self.lock();

        if state.loaded.contains(key) {
            return Ok(LoadRequest::AlreadyLoaded);
        }

        let definition = state
            .queue
            .get(key)
            .cloned()
            .ok_or_else(|| LoadError::UnknownAsset {
                key: key.to_string(),
            })?;
        let essential = definition.is_essential();

        if let Some(load) = state.pending.get(key) {
            log::trace!("Joining in-flight load of '{key}'");
            return Ok(LoadRequest::Pending {
                load: load.clone(),
                essential,
            });
        }

        let generation = state.generation;
        let manager = self.clone();
        let task = tokio::spawn(manager.run_load(definition, generation));

        let owned_key = key.to_string();
        let load = async move {
            task.await.unwrap_or_else(|e| {
                LoadOutcome::Failed(LoadError::Task {
                    key: owned_key,
                    message: e.to_string(),
                })
            })
        }
        .boxed()
        .shared();

        state.pending.insert(key.to_string(), load.clone());
        Ok(LoadRequest::Pending { load, essential })
    }

    /// The body of a spawned load. Dropping every waiter does not cancel it.
    async fn run_load(self, definition: AssetDefinition, generation: u64) -> LoadOutcome {
        if let Err(source) = definition.validate() {
            let error = LoadError::Invalid {
                key: definition.key.clone(),
                source,
            };
            return self.settle(&definition, generation, Err(error));
        }

        if !self.acquire_slot(&definition.key, generation).await {
            return LoadOutcome::Failed(LoadError::Abandoned {
                key: definition.key,
            });
        }

        log::debug!(
            "Loading '{}' ({}, {:?}) from '{}'",
            definition.key,
            definition.kind,
            definition.priority,
            definition.path.display()
        );

        let timeout = self.inner.config.load_timeout();
        let result = match tokio::time::timeout(timeout, self.inner.fetcher.fetch(&definition)).await
        {
            Ok(result) => result,
            Err(_) => Err(LoadError::Timeout {
                key: definition.key.clone(),
                timeout,
            }),
        };

        self.settle(&definition, generation, result)
    }

    /// Waits until fewer than the configured number of keys are in flight and
    /// claims a slot for `key`. Returns `false` if the manager was torn down
    /// in the meantime.
    async fn acquire_slot(&self, key: &str, generation: u64) -> bool {
        let limit = self.inner.config.concurrency_limit();
        let poll_interval = self.inner.config.poll_interval();

        loop {
            {
                let mut state = self.lock();
                if state.generation != generation {
                    return false;
                }
                if state.in_flight.len() < limit {
                    state.in_flight.insert(key.to_string());
                    return true;
                }
            }
            log::trace!("Load slots saturated, '{key}' waits {poll_interval:?}");
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Records the result of a fetch and publishes the matching event.
    fn settle(
        &self,
        definition: &AssetDefinition,
        generation: u64,
        result: Result<AssetData, LoadError>,
    ) -> LoadOutcome {
        let key = definition.key.as_str();
        let mut state = self.lock();

        if state.generation != generation {
            log::debug!("Discarding result for '{key}' from before a teardown");
            return LoadOutcome::Failed(LoadError::Abandoned {
                key: key.to_string(),
            });
        }

        state.in_flight.remove(key);
        state.pending.remove(key);

        match result {
            Ok(data) => {
                state.cache.insert(key, data);
                state.failed.remove(key);
                state.loaded.insert(key.to_string());
                drop(state);

                log::debug!("Loaded '{key}'");
                self.inner.events.publish(AssetEvent::FileComplete {
                    key: key.to_string(),
                });
                LoadOutcome::Loaded
            }
            Err(error) => {
                state.failed.insert(key.to_string());
                drop(state);

                if definition.is_essential() {
                    log::error!("Essential asset failed: {error}");
                } else {
                    log::warn!("Optional asset failed, continuing without it: {error}");
                }
                self.inner.events.publish(AssetEvent::LoadError {
                    key: key.to_string(),
                    error: error.clone(),
                });
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Makes sure the placeholder for `kind` is in the cache and returns its key.
    pub fn ensure_fallback_texture(&self, kind: FallbackKind) -> String {
        let key = kind.texture_key();
        let mut state = self.lock();
        if !state.cache.contains(&key) {
            let texture = self.inner.fallback_lane.draw(kind);
            state.cache.insert(key.clone(), AssetData::Texture(texture));
            log::debug!("Generated placeholder '{key}'");
        }
        key
    }

    /// Returns the data for `key`, following a recorded substitution if the
    /// asset itself failed.
    pub fn get(&self, key: &str) -> Option<AssetHandle<AssetData>> {
        let state = self.lock();
        state
            .cache
            .get(key)
            .or_else(|| {
                state
                    .substitutions
                    .get(key)
                    .and_then(|fallback| state.cache.get(fallback))
            })
            .cloned()
    }

    /// The key substituted for `key`, if any.
    pub fn substitution(&self, key: &str) -> Option<String> {
        self.lock().substitutions.get(key).cloned()
    }

    /// Returns the definition queued under `key`.
    pub fn definition(&self, key: &str) -> Option<AssetDefinition> {
        self.lock().queue.get(key).cloned()
    }

    /// Returns `true` if `key` loaded successfully and has not been evicted.
    pub fn is_loaded(&self, key: &str) -> bool {
        self.lock().loaded.contains(key)
    }

    /// Returns `true` if the last load of `key` failed.
    pub fn has_failed(&self, key: &str) -> bool {
        self.lock().failed.contains(key)
    }

    /// Returns `true` if `key` currently holds a load slot.
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.lock().in_flight.contains(key)
    }

    /// A snapshot of the bookkeeping counters.
    pub fn stats(&self) -> LoadingStats {
        self.lock().stats()
    }

    /// Subscribes to progress events.
    pub fn subscribe(&self) -> flume::Receiver<AssetEvent> {
        self.inner.events.subscribe()
    }

    /// Evicts every cached asset whose key is neither in `keep_keys` nor in
    /// the configured always-keep set, and returns how many were evicted.
    ///
    /// A kept key that was substituted keeps its substitute as well, so a
    /// drawn placeholder for an always-kept character survives.
    ///
    /// Evicted keys are no longer considered loaded and will be fetched again
    /// on the next request. There is no automatic eviction.
    pub fn cleanup_unused_assets(&self, keep_keys: &[&str]) -> usize {
        let config = &self.inner.config;
        let is_kept =
            |key: &str| keep_keys.iter().any(|kept| *kept == key) || config.is_always_kept(key);

        let mut state = self.lock();
        let substitutes: HashSet<String> = state
            .substitutions
            .iter()
            .filter(|(key, _)| is_kept(key.as_str()))
            .map(|(_, fallback)| fallback.clone())
            .collect();
        let evicted = state
            .cache
            .retain_keys(|key| is_kept(key) || substitutes.contains(key));

        for key in &evicted {
            state.loaded.remove(key);
        }
        let evicted_set: HashSet<&str> = evicted.iter().map(String::as_str).collect();
        state
            .substitutions
            .retain(|_, fallback| !evicted_set.contains(fallback.as_str()));
        drop(state);

        log::info!("Cleanup evicted {} asset(s)", evicted.len());
        evicted.len()
    }

    /// Tears the manager down: clears the queue, groups, every state set and
    /// the cache. Loads still running finish in the background and discard
    /// their result.
    pub fn destroy(&self) {
        let mut state = self.lock();
        let stats = state.stats();
        let generation = state.generation + 1;
        *state = LoaderState::new(generation);
        drop(state);

        log::info!(
            "AssetManager destroyed ({} cached, {} in flight dropped)",
            stats.cached,
            stats.in_flight
        );
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, LoaderState> {
        // Every critical section leaves the state consistent, so a panic in
        // one of them does not invalidate the data.
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
