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

//! Decoded asset payloads.

use super::{Asset, MediaKind};

/// A CPU-side RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Creates a texture filled with a single color.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}

/// A rectangle inside a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// A texture together with the frames sliced out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spritesheet {
    /// The whole sheet.
    pub texture: Texture,
    /// Frame rectangles, in playback order.
    pub frames: Vec<FrameRect>,
}

/// Container format of an audio clip, sniffed from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// RIFF/WAVE.
    Wav,
    /// Ogg container (usually Vorbis).
    Ogg,
    /// MPEG layer 3.
    Mp3,
}

/// Header information of a WAV clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Samples per second.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Frames per channel.
    pub duration_frames: u32,
}

/// An encoded audio clip. Decoding to samples happens at playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Container format.
    pub format: AudioFormat,
    /// Header details, only available for WAV.
    pub wav: Option<WavInfo>,
    /// The encoded bytes.
    pub bytes: Vec<u8>,
}

/// The decoded payload of any asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetData {
    /// A still image.
    Texture(Texture),
    /// A sliced spritesheet.
    Spritesheet(Spritesheet),
    /// An audio clip.
    Audio(AudioClip),
    /// Arbitrary JSON.
    Json(serde_json::Value),
    /// A JSON tile map.
    Tilemap(serde_json::Value),
}

impl AssetData {
    /// The media kind this payload was decoded as.
    pub fn kind(&self) -> MediaKind {
        match self {
            AssetData::Texture(_) => MediaKind::Image,
            AssetData::Spritesheet(_) => MediaKind::Spritesheet,
            AssetData::Audio(_) => MediaKind::Audio,
            AssetData::Json(_) => MediaKind::Json,
            AssetData::Tilemap(_) => MediaKind::Tilemap,
        }
    }

    /// The texture behind image-like payloads.
    pub fn texture(&self) -> Option<&Texture> {
        match self {
            AssetData::Texture(texture) => Some(texture),
            AssetData::Spritesheet(sheet) => Some(&sheet.texture),
            _ => None,
        }
    }

    /// The JSON value behind JSON and tile map payloads.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match self {
            AssetData::Json(value) | AssetData::Tilemap(value) => Some(value),
            _ => None,
        }
    }
}

impl Asset for AssetData {}
