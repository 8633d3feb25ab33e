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

//! Classification of failed assets into placeholder kinds.
//!
//! When an asset cannot be loaded and no substitute has been declared, the
//! pipeline draws a placeholder instead. Which placeholder is drawn is decided
//! here, from the asset key alone, so that drawing code never has to look at
//! asset names.

/// Placeholder color used for Isa.
pub const ISA_COLOR: [u8; 4] = [255, 105, 180, 255];
/// Placeholder color used for Stev.
pub const STEV_COLOR: [u8; 4] = [65, 105, 225, 255];

const TERRAIN_WORDS: &[&str] = &[
    "grass", "terrain", "dirt", "sand", "stone", "water", "path", "tile",
];
const DECORATION_WORDS: &[&str] = &[
    "tree", "bush", "flower", "rock", "plant", "decor", "mushroom",
];

/// The kind of placeholder drawn in place of a missing texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackKind {
    /// A colored token with a single letter, for characters.
    Character {
        /// Fill color.
        color: [u8; 4],
        /// Letter drawn over the fill.
        glyph: char,
    },
    /// A ground tile.
    Terrain,
    /// A generic round token.
    Entity,
    /// A small prop such as a tree or a bush.
    Decoration,
}

impl FallbackKind {
    /// The placeholders drawn eagerly when an asset manager is created.
    pub const GENERIC: [FallbackKind; 3] = [
        FallbackKind::Terrain,
        FallbackKind::Entity,
        FallbackKind::Decoration,
    ];

    /// Picks a placeholder for `key` by keyword.
    ///
    /// Character names win over terrain and decoration words, and anything
    /// unrecognised falls back to [`FallbackKind::Entity`].
    ///
    /// ```
    /// use carta_core::asset::FallbackKind;
    ///
    /// assert_eq!(FallbackKind::classify("grass_middle"), FallbackKind::Terrain);
    /// assert_eq!(FallbackKind::classify("door"), FallbackKind::Entity);
    /// ```
    pub fn classify(key: &str) -> FallbackKind {
        let key = key.to_ascii_lowercase();

        if key.contains("isa") {
            return FallbackKind::Character {
                color: ISA_COLOR,
                glyph: 'I',
            };
        }
        if key.contains("stev") {
            return FallbackKind::Character {
                color: STEV_COLOR,
                glyph: 'S',
            };
        }
        if TERRAIN_WORDS.iter().any(|word| key.contains(word)) {
            return FallbackKind::Terrain;
        }
        if DECORATION_WORDS.iter().any(|word| key.contains(word)) {
            return FallbackKind::Decoration;
        }

        FallbackKind::Entity
    }

    /// The well-known cache key the placeholder is registered under.
    pub fn texture_key(&self) -> String {
        match self {
            FallbackKind::Character { glyph, .. } => {
                format!("fallback_character_{}", glyph.to_ascii_lowercase())
            }
            FallbackKind::Terrain => "fallback_terrain".to_string(),
            FallbackKind::Entity => "fallback_entity".to_string(),
            FallbackKind::Decoration => "fallback_decoration".to_string(),
        }
    }
}
