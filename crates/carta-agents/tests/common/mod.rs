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

//! A scripted fetcher shared by the asset manager tests.

#![allow(dead_code)]

use async_trait::async_trait;
use carta_core::{
    asset::{AssetData, AssetDefinition, MediaKind, Texture},
    AssetFetcher, LoadError, LoaderConfig,
};
use carta_agents::AssetManager;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

/// How the mock answers a fetch for one key.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Succeeds after the delay.
    Succeed(Duration),
    /// Fails with an I/O error after the delay.
    Fail(Duration),
    /// Never completes.
    Hang,
}

/// A fetcher whose answers are scripted per key. Unscripted keys succeed
/// after 50ms.
#[derive(Default)]
pub struct MockFetcher {
    behaviors: Mutex<HashMap<String, Behavior>>,
    calls: Mutex<HashMap<String, usize>>,
    started: Mutex<Vec<String>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, key: &str, behavior: Behavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(key.to_string(), behavior);
    }

    pub fn fail(&self, key: &str) {
        self.script(key, Behavior::Fail(Duration::from_millis(10)));
    }

    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn start_order(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetFetcher for MockFetcher {
    async fn fetch(&self, definition: &AssetDefinition) -> Result<AssetData, LoadError> {
        let key = definition.key.clone();
        *self.calls.lock().unwrap().entry(key.clone()).or_default() += 1;
        self.started.lock().unwrap().push(key.clone());

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_active, Ordering::SeqCst);
        let _guard = ActiveGuard(&self.active);

        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(Behavior::Succeed(Duration::from_millis(50)));

        match behavior {
            Behavior::Succeed(delay) => {
                tokio::time::sleep(delay).await;
                Ok(match definition.kind {
                    MediaKind::Json | MediaKind::Tilemap => {
                        AssetData::Json(serde_json::json!({ "key": key }))
                    }
                    _ => AssetData::Texture(Texture::solid(2, 2, [9, 9, 9, 255])),
                })
            }
            Behavior::Fail(delay) => {
                tokio::time::sleep(delay).await;
                Err(LoadError::Io {
                    key,
                    path: definition.path.clone(),
                    message: "No such file or directory".to_string(),
                })
            }
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!("a pending future never completes")
            }
        }
    }
}

/// A manager over `fetcher` with the default configuration.
pub fn manager(fetcher: &Arc<MockFetcher>) -> AssetManager {
    AssetManager::new(fetcher.clone(), LoaderConfig::default())
}
