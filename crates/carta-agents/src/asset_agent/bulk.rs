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

//! Bulk loading of the static catalog and fallback resolution.

use super::{manager::AssetManager, state::LoadOutcome};
use carta_core::{
    asset::{AssetDefinition, FallbackKind, FallbackSubstitution, LoadResult},
    event::AssetEvent,
};
use futures::future::join_all;
use std::time::Instant;

impl AssetManager {
    /// Loads the whole static catalog and aggregates the outcome.
    ///
    /// Loads are started in priority order, critical first, and still go
    /// through the concurrency limit. Once every load has settled, each failed
    /// asset is resolved in turn:
    ///
    /// 1. a declared fallback that has not failed is used, loading it first if
    ///    needed;
    /// 2. otherwise a required image or spritesheet gets a drawn placeholder
    ///    chosen by [`FallbackKind::classify`];
    /// 3. otherwise the asset stays unresolved.
    ///
    /// `success` is `false` only if a required asset stays unresolved.
    pub async fn load_all_assets(&self) -> LoadResult {
        let started = Instant::now();
        let catalog: Vec<AssetDefinition> = {
            let state = self.lock();
            state
                .catalog
                .iter()
                .filter_map(|key| state.queue.get(key).cloned())
                .collect()
        };

        let mut order: Vec<usize> = (0..catalog.len()).collect();
        order.sort_by_key(|&index| catalog[index].priority);

        log::info!("Loading {} catalog asset(s)", catalog.len());
        let settled = join_all(
            order
                .iter()
                .map(|&index| self.load_tracked(&catalog[index].key)),
        )
        .await;

        let mut outcomes = vec![LoadOutcome::Loaded; catalog.len()];
        for (index, outcome) in order.into_iter().zip(settled) {
            outcomes[index] = outcome;
        }

        let mut result = LoadResult::default();
        for (definition, outcome) in catalog.iter().zip(&outcomes) {
            match outcome {
                LoadOutcome::Loaded => result.loaded_assets.push(definition.key.clone()),
                LoadOutcome::Failed(_) => result.failed_assets.push(definition.key.clone()),
            }
        }

        let mut unresolved = Vec::new();
        for (definition, outcome) in catalog.iter().zip(&outcomes) {
            if outcome.is_loaded() {
                continue;
            }
            match self.resolve_fallback(definition).await {
                Some(fallback) => result
                    .fallbacks_used
                    .push(FallbackSubstitution::new(&definition.key, fallback)),
                None if definition.required => unresolved.push(definition.key.as_str()),
                None => {}
            }
        }

        result.success = unresolved.is_empty();

        self.inner.events.publish(AssetEvent::Complete {
            loaded: result.loaded_assets.len(),
            failed: result.failed_assets.len(),
        });

        log::info!(
            "Catalog load finished in {:?}: {} loaded, {} failed, {} fallback(s)",
            started.elapsed(),
            result.loaded_assets.len(),
            result.failed_assets.len(),
            result.fallbacks_used.len()
        );
        if !result.success {
            log::error!("Required assets without any usable resolution: {unresolved:?}");
        }

        result
    }

    /// Finds a substitute for the asset queued under `key` and records it.
    ///
    /// Returns the substitute key, or `None` if the asset is unknown or has no
    /// usable resolution. See [`load_all_assets`](Self::load_all_assets) for
    /// the resolution order.
    pub async fn apply_fallback(&self, key: &str) -> Option<String> {
        let definition = self.definition(key)?;
        self.resolve_fallback(&definition).await
    }

    async fn resolve_fallback(&self, definition: &AssetDefinition) -> Option<String> {
        let key = definition.key.as_str();

        if let Some(fallback) = &definition.fallback {
            if self.declared_fallback_available(fallback).await {
                self.record_substitution(key, fallback);
                return Some(fallback.clone());
            }
            log::warn!("Declared fallback '{fallback}' of '{key}' is not usable");
        }

        if definition.required && definition.kind.is_image_like() {
            let fallback = self.ensure_fallback_texture(FallbackKind::classify(key));
            self.record_substitution(key, &fallback);
            return Some(fallback);
        }

        None
    }

    async fn declared_fallback_available(&self, fallback: &str) -> bool {
        let (failed, cached, queued) = {
            let state = self.lock();
            (
                state.failed.contains(fallback),
                state.cache.contains(fallback),
                state.queue.contains_key(fallback),
            )
        };

        if failed {
            false
        } else if cached {
            true
        } else if queued {
            self.load_tracked(fallback).await.is_loaded()
        } else {
            false
        }
    }

    fn record_substitution(&self, key: &str, fallback: &str) {
        self.lock()
            .substitutions
            .insert(key.to_string(), fallback.to_string());

        log::info!("Using '{fallback}' in place of '{key}'");
        self.inner.events.publish(AssetEvent::FallbackUsed {
            key: key.to_string(),
            fallback: fallback.to_string(),
        });
    }
}
