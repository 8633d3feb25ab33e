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

//! Spritesheet decoding and frame slicing.

use super::super::{AssetLoaderLane, BoxError};
use super::texture_loader_lane::decode_texture;
use anyhow::{anyhow, bail, Result};
use carta_core::asset::{AssetData, AssetDefinition, FrameConfig, FrameRect, Spritesheet};

/// A lane that decodes a sheet and slices it into frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpritesheetLoaderLane;

impl AssetLoaderLane for SpritesheetLoaderLane {
    fn load(&self, definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, BoxError> {
        let frame = definition
            .frame
            .ok_or_else(|| anyhow!("spritesheet has no frame configuration"))?;

        let texture = decode_texture(bytes)?;
        let frames = slice_frames(texture.width, texture.height, &frame)?;

        Ok(AssetData::Spritesheet(Spritesheet { texture, frames }))
    }
}

/// Cuts a `width` x `height` sheet into frames, row by row.
///
/// # Errors
/// Fails if not even one frame fits or if the requested frame range starts
/// past the last frame. An end frame past the last frame is clamped.
pub fn slice_frames(width: u32, height: u32, frame: &FrameConfig) -> Result<Vec<FrameRect>> {
    if frame.frame_width == 0 || frame.frame_height == 0 {
        bail!("frame dimensions must be non-zero");
    }

    // Widened so that oversized margins or spacing cannot overflow.
    let margin = u64::from(frame.margin);
    let spacing = u64::from(frame.spacing);
    let step_w = u64::from(frame.frame_width) + spacing;
    let step_h = u64::from(frame.frame_height) + spacing;
    let usable_w = u64::from(width).saturating_sub(2 * margin);
    let usable_h = u64::from(height).saturating_sub(2 * margin);
    let columns = (usable_w + spacing) / step_w;
    let rows = (usable_h + spacing) / step_h;
    let total = columns
        .checked_mul(rows)
        .ok_or_else(|| anyhow!("frame grid of {columns}x{rows} is too large"))?;

    if total == 0 {
        bail!(
            "a {}x{} frame does not fit in a {}x{} sheet",
            frame.frame_width,
            frame.frame_height,
            width,
            height
        );
    }
    let start = u64::from(frame.start_frame);
    if start >= total {
        bail!(
            "start frame {} is past the last frame ({})",
            frame.start_frame,
            total - 1
        );
    }

    let last = frame
        .end_frame
        .map_or(total - 1, |end| u64::from(end).min(total - 1));

    (start..=last)
        .map(|index| -> Result<FrameRect> {
            let column = index % columns;
            let row = index / columns;
            Ok(FrameRect {
                x: u32::try_from(margin + column * step_w)?,
                y: u32::try_from(margin + row * step_h)?,
                width: frame.frame_width,
                height: frame.frame_height,
            })
        })
        .collect()
}
