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

//! Texture decoding.

use super::super::{AssetLoaderLane, BoxError};
use anyhow::{Context, Result};
use carta_core::asset::{AssetData, AssetDefinition, Texture};

/// A lane dedicated to decoding still images on the CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoaderLane;

impl AssetLoaderLane for TextureLoaderLane {
    fn load(&self, _definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, BoxError> {
        Ok(AssetData::Texture(decode_texture(bytes)?))
    }
}

/// Decodes any format the `image` crate recognises into RGBA8.
pub fn decode_texture(bytes: &[u8]) -> Result<Texture> {
    let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    Ok(Texture {
        width,
        height,
        pixels: rgba_img.into_raw(),
    })
}
