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

//! The filesystem-backed [`AssetFetcher`].

use crate::asset_lane::LaneRegistry;
use async_trait::async_trait;
use carta_core::{
    asset::{AssetData, AssetDefinition},
    AssetFetcher, LoadError,
};
use carta_io::AssetReader;
use std::{path::PathBuf, sync::Arc};

/// Reads asset files from disk and decodes them through a [`LaneRegistry`].
///
/// Reading is asynchronous; decoding runs on the blocking thread pool so that
/// large images never stall the runtime's worker threads.
#[derive(Clone)]
pub struct FileSystemFetcher {
    reader: AssetReader,
    lanes: Arc<LaneRegistry>,
}

impl FileSystemFetcher {
    /// Creates a fetcher rooted at `root` with every default lane.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_lanes(root, LaneRegistry::with_default_lanes())
    }

    /// Creates a fetcher rooted at `root` with a custom lane registry.
    pub fn with_lanes(root: impl Into<PathBuf>, lanes: LaneRegistry) -> Self {
        Self {
            reader: AssetReader::new(root),
            lanes: Arc::new(lanes),
        }
    }

    /// The underlying reader.
    pub fn reader(&self) -> &AssetReader {
        &self.reader
    }
}

#[async_trait]
impl AssetFetcher for FileSystemFetcher {
    async fn fetch(&self, definition: &AssetDefinition) -> Result<AssetData, LoadError> {
        // Unsupported kinds are rejected before touching the disk.
        if !self.lanes.supports(definition.kind) {
            return Err(LoadError::UnsupportedKind {
                key: definition.key.clone(),
                kind: definition.kind,
            });
        }

        let bytes = self.reader.read(definition).await?;

        let lanes = Arc::clone(&self.lanes);
        let owned = definition.clone();
        tokio::task::spawn_blocking(move || lanes.decode(&owned, &bytes))
            .await
            .map_err(|e| LoadError::Task {
                key: definition.key.clone(),
                message: e.to_string(),
            })?
    }
}
