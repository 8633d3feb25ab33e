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

//! Decoding lanes and the registry that dispatches to them by media kind.

pub mod loading;

pub use loading::*;

use carta_core::{
    asset::{AssetData, AssetDefinition, MediaKind},
    LoadError,
};
use std::{collections::HashMap, error::Error};

/// The error type lanes report; it is flattened into [`LoadError::Decode`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A trait for types that decode one media kind from a byte slice.
///
/// Lanes do the CPU-bound part of loading and are run on the blocking pool by
/// the fetcher. They see the definition so that format details such as
/// spritesheet frame geometry are available.
pub trait AssetLoaderLane: Send + Sync {
    /// Decodes `bytes` into an [`AssetData`].
    ///
    /// # Errors
    /// Returns a boxed error if the bytes are not a valid instance of the format.
    fn load(&self, definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, BoxError>;
}

/// Maps each media kind to the lane that decodes it.
#[derive(Default)]
pub struct LaneRegistry {
    lanes: HashMap<MediaKind, Box<dyn AssetLoaderLane>>,
}

impl LaneRegistry {
    /// Creates a registry with no lanes.
    pub fn new() -> Self {
        Self {
            lanes: HashMap::new(),
        }
    }

    /// Creates a registry with a lane for every [`MediaKind`].
    pub fn with_default_lanes() -> Self {
        let mut registry = Self::new();
        registry.register(MediaKind::Image, TextureLoaderLane);
        registry.register(MediaKind::Spritesheet, SpritesheetLoaderLane);
        registry.register(MediaKind::Audio, AudioLoaderLane);
        registry.register(MediaKind::Json, JsonLoaderLane);
        registry.register(MediaKind::Tilemap, TilemapLoaderLane);
        registry
    }

    /// Registers `lane` for `kind`, replacing any previous lane.
    pub fn register(&mut self, kind: MediaKind, lane: impl AssetLoaderLane + 'static) {
        self.lanes.insert(kind, Box::new(lane));
    }

    /// Returns `true` if a lane handles `kind`.
    pub fn supports(&self, kind: MediaKind) -> bool {
        self.lanes.contains_key(&kind)
    }

    /// Decodes `bytes` with the lane registered for the definition's kind.
    ///
    /// # Errors
    /// [`LoadError::UnsupportedKind`] if no lane is registered, otherwise
    /// [`LoadError::Decode`] with the lane's message.
    pub fn decode(&self, definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, LoadError> {
        let lane = self
            .lanes
            .get(&definition.kind)
            .ok_or_else(|| LoadError::UnsupportedKind {
                key: definition.key.clone(),
                kind: definition.kind,
            })?;

        lane.load(definition, bytes).map_err(|e| LoadError::Decode {
            key: definition.key.clone(),
            message: format!("{e:#}"),
        })
    }
}
