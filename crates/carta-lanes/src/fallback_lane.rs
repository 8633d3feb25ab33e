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

//! Procedural placeholder textures.
//!
//! Placeholders are small, flat drawings that keep a scene readable when art
//! is missing: a tile for terrain, a token for characters and entities, a
//! little tree for decorations. They are drawn with plain pixel writes into an
//! [`image::RgbaImage`].

use carta_core::asset::{FallbackKind, Texture};
use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

const ENTITY_FILL: Rgba<u8> = Rgba([128, 128, 128, 255]);
const ENTITY_OUTLINE: Rgba<u8> = Rgba([64, 64, 64, 255]);
const TERRAIN_FILL: Rgba<u8> = Rgba([76, 153, 0, 255]);
const TERRAIN_BORDER: Rgba<u8> = Rgba([51, 102, 0, 255]);
const TERRAIN_SPECKLE: Rgba<u8> = Rgba([102, 178, 34, 255]);
const TRUNK: Rgba<u8> = Rgba([101, 67, 33, 255]);
const CANOPY: Rgba<u8> = Rgba([34, 139, 34, 255]);

/// Smallest placeholder that still leaves room for a glyph.
const MIN_SIZE: u32 = 8;

/// 3x5 bitmap font for `A..=Z`. Each row uses the low three bits, the most
/// significant of them being the leftmost pixel.
static GLYPHS: [[u8; 5]; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
];

/// Draws square placeholder textures.
#[derive(Debug, Clone, Copy)]
pub struct FallbackTextureLane {
    size: u32,
}

impl Default for FallbackTextureLane {
    fn default() -> Self {
        Self::new(carta_core::config::DEFAULT_FALLBACK_TEXTURE_SIZE)
    }
}

impl FallbackTextureLane {
    /// Creates a lane drawing `size` x `size` textures. Sizes below 8 are
    /// raised to 8.
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(MIN_SIZE),
        }
    }

    /// Edge length of the drawn textures.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Draws the placeholder for `kind`.
    pub fn draw(&self, kind: FallbackKind) -> Texture {
        let mut img = RgbaImage::from_pixel(self.size, self.size, TRANSPARENT);

        match kind {
            FallbackKind::Terrain => self.draw_tile(&mut img),
            FallbackKind::Entity => self.draw_token(&mut img, ENTITY_FILL, ENTITY_OUTLINE),
            FallbackKind::Decoration => self.draw_tree(&mut img),
            FallbackKind::Character { color, glyph } => {
                self.draw_token(&mut img, Rgba(color), darken(color));
                self.draw_glyph(&mut img, glyph);
            }
        }

        log::trace!("Drew {}x{} placeholder for {:?}", self.size, self.size, kind);

        let (width, height) = img.dimensions();
        Texture {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    fn draw_tile(&self, img: &mut RgbaImage) {
        let last = self.size - 1;
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = if x == 0 || y == 0 || x == last || y == last {
                TERRAIN_BORDER
            } else if (x * 7 + y * 13) % 11 == 0 {
                TERRAIN_SPECKLE
            } else {
                TERRAIN_FILL
            };
        }
    }

    fn draw_token(&self, img: &mut RgbaImage, fill: Rgba<u8>, outline: Rgba<u8>) {
        let center = (self.size as f32 - 1.0) / 2.0;
        let radius = self.size as f32 / 2.0 - 1.0;
        fill_circle(img, (center, center), radius, outline);
        fill_circle(img, (center, center), radius - 1.5, fill);
    }

    fn draw_tree(&self, img: &mut RgbaImage) {
        let s = self.size;
        for y in s * 5 / 8..s - 1 {
            for x in s * 7 / 16..s * 9 / 16 {
                img.put_pixel(x, y, TRUNK);
            }
        }
        let center_x = (s as f32 - 1.0) / 2.0;
        let center_y = s as f32 * 3.0 / 8.0;
        fill_circle(img, (center_x, center_y), s as f32 * 5.0 / 16.0, CANOPY);
    }

    fn draw_glyph(&self, img: &mut RgbaImage, glyph: char) {
        let Some(rows) = glyph_rows(glyph) else {
            log::debug!("No placeholder glyph for {glyph:?}, drawing a bare token");
            return;
        };

        let scale = (self.size / 8).max(1);
        let origin_x = (self.size - 3 * scale) / 2;
        let origin_y = (self.size - 5 * scale) / 2;

        for (row, bits) in rows.iter().enumerate() {
            for column in 0..3u32 {
                if bits & (0b100 >> column) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(
                            origin_x + column * scale + dx,
                            origin_y + row as u32 * scale + dy,
                            GLYPH_COLOR,
                        );
                    }
                }
            }
        }
    }
}

fn glyph_rows(glyph: char) -> Option<&'static [u8; 5]> {
    let upper = glyph.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| &GLYPHS[(upper as u8 - b'A') as usize])
}

fn darken(color: [u8; 4]) -> Rgba<u8> {
    let scale = |channel: u8| (u16::from(channel) * 3 / 5) as u8;
    Rgba([scale(color[0]), scale(color[1]), scale(color[2]), 255])
}

fn fill_circle(img: &mut RgbaImage, center: (f32, f32), radius: f32, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 - center.0;
        let dy = y as f32 - center.1;
        if dx * dx + dy * dy <= radius * radius {
            *pixel = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_core::asset::{ISA_COLOR, STEV_COLOR};

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn test_default_size_is_32() {
        let texture = FallbackTextureLane::default().draw(FallbackKind::Entity);
        assert_eq!((texture.width, texture.height), (32, 32));
        assert_eq!(texture.byte_size(), 32 * 32 * 4);
    }

    #[test]
    fn test_entity_is_a_round_token() {
        let texture = FallbackTextureLane::default().draw(FallbackKind::Entity);
        assert_eq!(texture.pixel(16, 16), Some(ENTITY_FILL.0));
        assert_eq!(texture.pixel(0, 0), Some(CLEAR));
        assert_eq!(texture.pixel(31, 31), Some(CLEAR));
    }

    #[test]
    fn test_terrain_is_an_opaque_tile() {
        let texture = FallbackTextureLane::default().draw(FallbackKind::Terrain);
        assert_eq!(texture.pixel(0, 0), Some(TERRAIN_BORDER.0));
        assert_eq!(texture.pixel(31, 5), Some(TERRAIN_BORDER.0));
        assert!(texture.pixels.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_decoration_has_trunk_and_canopy() {
        let texture = FallbackTextureLane::default().draw(FallbackKind::Decoration);
        assert_eq!(texture.pixel(15, 28), Some(TRUNK.0));
        assert_eq!(texture.pixel(15, 12), Some(CANOPY.0));
        assert_eq!(texture.pixel(0, 31), Some(CLEAR));
    }

    #[test]
    fn test_character_token_carries_its_glyph() {
        let lane = FallbackTextureLane::default();
        let isa = lane.draw(FallbackKind::Character {
            color: ISA_COLOR,
            glyph: 'I',
        });
        // Centre of the 'I' stem.
        assert_eq!(isa.pixel(16, 16), Some(WHITE));
        // Left of the stem, inside the token.
        assert_eq!(isa.pixel(11, 16), Some(ISA_COLOR));

        let stev = lane.draw(FallbackKind::Character {
            color: STEV_COLOR,
            glyph: 's',
        });
        assert_ne!(isa, stev);
    }

    #[test]
    fn test_unknown_glyph_draws_bare_token() {
        let lane = FallbackTextureLane::new(16);
        let texture = lane.draw(FallbackKind::Character {
            color: STEV_COLOR,
            glyph: '?',
        });
        assert_eq!(texture.width, 16);
        assert!(!texture.pixels.chunks(4).any(|px| px == WHITE));
    }

    #[test]
    fn test_tiny_sizes_are_raised() {
        assert_eq!(FallbackTextureLane::new(2).size(), 8);
    }
}
