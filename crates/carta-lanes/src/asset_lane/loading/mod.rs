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

//! Concrete lanes, one per media kind.

mod audio_loader_lane;
mod json_loader_lane;
mod spritesheet_loader_lane;
mod texture_loader_lane;

pub use audio_loader_lane::AudioLoaderLane;
pub use json_loader_lane::{JsonLoaderLane, TilemapLoaderLane};
pub use spritesheet_loader_lane::{slice_frames, SpritesheetLoaderLane};
pub use texture_loader_lane::{decode_texture, TextureLoaderLane};
