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

//! JSON and tile map decoding.

use super::super::{AssetLoaderLane, BoxError};
use anyhow::{bail, Context, Result};
use carta_core::asset::{AssetData, AssetDefinition};

/// A lane that parses arbitrary JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoaderLane;

impl AssetLoaderLane for JsonLoaderLane {
    fn load(&self, _definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, BoxError> {
        let value = serde_json::from_slice(bytes).context("Invalid JSON document")?;
        Ok(AssetData::Json(value))
    }
}

/// A lane that parses JSON tile maps.
///
/// Only the outline is checked: the root must be an object with a `layers`
/// array. Layer contents are interpreted by the world builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct TilemapLoaderLane;

impl AssetLoaderLane for TilemapLoaderLane {
    fn load(&self, _definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, BoxError> {
        Ok(AssetData::Tilemap(parse_tilemap(bytes)?))
    }
}

fn parse_tilemap(bytes: &[u8]) -> Result<serde_json::Value> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).context("Invalid tile map JSON")?;

    if !value.get("layers").is_some_and(serde_json::Value::is_array) {
        bail!("tile map has no 'layers' array");
    }
    Ok(value)
}
