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

use crate::error::AssetError;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

/// The media kind of an asset, which selects the lane used to decode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A single still image (PNG, JPEG, ...).
    Image,
    /// A sound effect or music track.
    Audio,
    /// Arbitrary JSON data, e.g. dialogue tables.
    Json,
    /// A JSON tile map with a `layers` array.
    Tilemap,
    /// An image sliced into equally sized animation frames.
    Spritesheet,
}

impl MediaKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Image,
        MediaKind::Audio,
        MediaKind::Json,
        MediaKind::Tilemap,
        MediaKind::Spritesheet,
    ];

    /// The lowercase name used in manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Json => "json",
            MediaKind::Tilemap => "tilemap",
            MediaKind::Spritesheet => "spritesheet",
        }
    }

    /// Returns `true` for kinds that end up as a texture and can therefore be
    /// replaced by a drawn placeholder.
    pub fn is_image_like(self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Spritesheet)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AssetError::UnknownMediaKind {
                kind: s.to_string(),
            })
    }
}

/// Loading priority of an asset. Ordered from most to least urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetPriority {
    /// Startup cannot meaningfully proceed without this asset.
    Critical,
    /// Needed for the first playable frame.
    High,
    /// Needed soon after startup.
    #[default]
    Medium,
    /// Cosmetic, may stream in late or never.
    Low,
}

impl FromStr for AssetPriority {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(AssetPriority::Critical),
            "high" => Ok(AssetPriority::High),
            "medium" => Ok(AssetPriority::Medium),
            "low" => Ok(AssetPriority::Low),
            _ => Err(AssetError::UnknownPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Frame geometry used to slice a spritesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Width of one frame in pixels.
    pub frame_width: u32,
    /// Height of one frame in pixels.
    pub frame_height: u32,
    /// Index of the first frame to keep.
    #[serde(default)]
    pub start_frame: u32,
    /// Index of the last frame to keep, inclusive. `None` keeps every frame.
    #[serde(default)]
    pub end_frame: Option<u32>,
    /// Border around the whole sheet, in pixels.
    #[serde(default)]
    pub margin: u32,
    /// Gap between adjacent frames, in pixels.
    #[serde(default)]
    pub spacing: u32,
}

impl FrameConfig {
    /// Frames of `width` x `height` with no margin or spacing.
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            start_frame: 0,
            end_frame: None,
            margin: 0,
            spacing: 0,
        }
    }
}

/// The declarative description of a single asset.
///
/// Definitions are plain data: they come from a manifest, from a template
/// expansion, or from code, and are handed to the asset manager which owns the
/// load queue. The `key` is the identity of the asset everywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefinition {
    /// Unique identifier within the load queue.
    pub key: String,
    /// Path of the source file, relative to the asset root.
    pub path: PathBuf,
    /// Media kind, which selects the decoding lane.
    pub kind: MediaKind,
    /// Key of another asset to use if this one fails.
    #[serde(default)]
    pub fallback: Option<String>,
    /// Whether the bulk load is unsuccessful without this asset.
    #[serde(default)]
    pub required: bool,
    /// Loading priority.
    #[serde(default)]
    pub priority: AssetPriority,
    /// Free-form category, e.g. `"trees"`.
    #[serde(default)]
    pub category: Option<String>,
    /// Frame geometry, only meaningful for spritesheets.
    #[serde(default)]
    pub frame: Option<FrameConfig>,
}

impl AssetDefinition {
    /// Creates an optional, medium priority definition.
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            kind,
            fallback: None,
            required: false,
            priority: AssetPriority::Medium,
            category: None,
            frame: None,
        }
    }

    /// Shorthand for an image definition.
    pub fn image(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(key, path, MediaKind::Image)
    }

    /// Shorthand for a spritesheet definition with the given frame geometry.
    pub fn spritesheet(key: impl Into<String>, path: impl Into<PathBuf>, frame: FrameConfig) -> Self {
        Self::new(key, path, MediaKind::Spritesheet).with_frames(frame)
    }

    /// Marks the asset as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the loading priority.
    pub fn with_priority(mut self, priority: AssetPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Declares a fallback asset key.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the spritesheet frame geometry.
    pub fn with_frames(mut self, frame: FrameConfig) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Returns `true` if a failure of this asset must reach the caller
    /// instead of being swallowed.
    pub fn is_essential(&self) -> bool {
        self.required || self.priority == AssetPriority::Critical
    }

    /// Checks the invariants a definition must satisfy before it is queued.
    ///
    /// # Errors
    /// Returns an [`AssetError`] if the key is blank, if the asset declares
    /// itself as its own fallback, or if a spritesheet has missing or
    /// degenerate frame geometry.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.key.trim().is_empty() {
            return Err(AssetError::EmptyKey {
                path: self.path.clone(),
            });
        }

        if self.fallback.as_deref() == Some(self.key.as_str()) {
            return Err(AssetError::SelfFallback {
                key: self.key.clone(),
            });
        }

        if self.kind == MediaKind::Spritesheet {
            match self.frame {
                None => {
                    return Err(AssetError::MissingFrameConfig {
                        key: self.key.clone(),
                    })
                }
                Some(frame) if frame.frame_width == 0 || frame.frame_height == 0 => {
                    return Err(AssetError::InvalidFrameConfig {
                        key: self.key.clone(),
                        reason: "frame dimensions must be non-zero".to_string(),
                    })
                }
                Some(FrameConfig {
                    start_frame,
                    end_frame: Some(end),
                    ..
                }) if end < start_frame => {
                    return Err(AssetError::InvalidFrameConfig {
                        key: self.key.clone(),
                        reason: format!("end frame {end} precedes start frame {start_frame}"),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// A named, ordered bundle of definitions loaded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetGroup {
    /// Group name.
    pub name: String,
    /// Member definitions, in declaration order.
    pub assets: Vec<AssetDefinition>,
    /// Whether the group is loaded by `preload_groups`.
    #[serde(default)]
    pub preload: bool,
}

impl AssetGroup {
    /// Iterates the member keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|def| def.key.as_str())
    }

    /// Returns `true` if the group declares `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parsing() {
        assert_eq!("image".parse::<MediaKind>().unwrap(), MediaKind::Image);
        assert_eq!(" Spritesheet ".parse::<MediaKind>().unwrap(), MediaKind::Spritesheet);

        let err = "video".parse::<MediaKind>().unwrap_err();
        assert!(matches!(err, AssetError::UnknownMediaKind { kind } if kind == "video"));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(AssetPriority::Critical < AssetPriority::High);
        assert!(AssetPriority::Medium < AssetPriority::Low);
        assert_eq!("LOW".parse::<AssetPriority>().unwrap(), AssetPriority::Low);
    }

    #[test]
    fn test_essential_flags() {
        let optional = AssetDefinition::image("grass", "terrain/grass.png");
        assert!(!optional.is_essential());
        assert!(optional.clone().required().is_essential());
        assert!(optional
            .with_priority(AssetPriority::Critical)
            .is_essential());
    }

    #[test]
    fn test_validate_rejects_bad_definitions() {
        let blank = AssetDefinition::image("  ", "a.png");
        assert!(matches!(blank.validate(), Err(AssetError::EmptyKey { .. })));

        let selfish = AssetDefinition::image("a", "a.png").with_fallback("a");
        assert!(matches!(selfish.validate(), Err(AssetError::SelfFallback { .. })));

        let no_frames = AssetDefinition::new("walk", "walk.png", MediaKind::Spritesheet);
        assert!(matches!(
            no_frames.validate(),
            Err(AssetError::MissingFrameConfig { .. })
        ));

        let mut inverted = FrameConfig::new(16, 16);
        inverted.start_frame = 4;
        inverted.end_frame = Some(2);
        let bad_range = AssetDefinition::spritesheet("walk", "walk.png", inverted);
        assert!(matches!(
            bad_range.validate(),
            Err(AssetError::InvalidFrameConfig { .. })
        ));

        let ok = AssetDefinition::spritesheet("walk", "walk.png", FrameConfig::new(16, 16));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_definition_from_ron_uses_defaults() {
        let def: AssetDefinition =
            ron::from_str(r#"(key: "dialogues", path: "data/dialogues.json", kind: json)"#)
                .unwrap();
        assert_eq!(def.kind, MediaKind::Json);
        assert_eq!(def.priority, AssetPriority::Medium);
        assert!(!def.required);
        assert!(def.fallback.is_none());
    }
}
