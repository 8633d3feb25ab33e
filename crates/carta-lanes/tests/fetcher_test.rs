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

use carta_core::{
    asset::{AssetData, AssetDefinition, FrameConfig, MediaKind},
    AssetFetcher, LoadError,
};
use carta_lanes::{FileSystemFetcher, LaneRegistry};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tempfile::tempdir;

fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .unwrap();
}

#[tokio::test]
async fn test_fetch_image_from_disk() {
    let dir = tempdir().unwrap();
    write_png(
        &dir.path().join("characters/isa_happy.png"),
        4,
        6,
        [255, 105, 180, 255],
    );

    let fetcher = FileSystemFetcher::new(dir.path());
    let def = AssetDefinition::image("isa_happy", "characters/isa_happy.png");

    let data = fetcher.fetch(&def).await.unwrap();
    let texture = data.texture().expect("image should decode to a texture");
    assert_eq!((texture.width, texture.height), (4, 6));
    assert_eq!(texture.pixel(3, 5), Some([255, 105, 180, 255]));
}

#[tokio::test]
async fn test_fetch_spritesheet_slices_frames() {
    let dir = tempdir().unwrap();
    write_png(&dir.path().join("isa_walk.png"), 64, 16, [0, 0, 0, 255]);

    let fetcher = FileSystemFetcher::new(dir.path());
    let def = AssetDefinition::spritesheet("isa_walk", "isa_walk.png", FrameConfig::new(16, 16));

    match fetcher.fetch(&def).await.unwrap() {
        AssetData::Spritesheet(sheet) => {
            assert_eq!(sheet.frames.len(), 4);
            assert_eq!(sheet.frames[3].x, 48);
        }
        other => panic!("expected a spritesheet, got {:?}", other.kind()),
    }
}

#[tokio::test]
async fn test_fetch_json_from_disk() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("dialogues.json"),
        br#"{"greeting": "Hola"}"#,
    )
    .unwrap();

    let fetcher = FileSystemFetcher::new(dir.path());
    let def = AssetDefinition::new("dialogues", "dialogues.json", MediaKind::Json).required();

    let data = fetcher.fetch(&def).await.unwrap();
    assert_eq!(data.json().unwrap()["greeting"], "Hola");
}

#[tokio::test]
async fn test_missing_file_reports_io_error() {
    let dir = tempdir().unwrap();
    let fetcher = FileSystemFetcher::new(dir.path());
    let def = AssetDefinition::image("ghost", "ghost.png");

    assert!(matches!(
        fetcher.fetch(&def).await,
        Err(LoadError::Io { key, .. }) if key == "ghost"
    ));
}

#[tokio::test]
async fn test_corrupt_image_reports_decode_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("broken.png"), b"definitely not a png").unwrap();

    let fetcher = FileSystemFetcher::new(dir.path());
    let def = AssetDefinition::image("broken", "broken.png");

    assert!(matches!(
        fetcher.fetch(&def).await,
        Err(LoadError::Decode { key, .. }) if key == "broken"
    ));
}

#[tokio::test]
async fn test_unsupported_kind_is_rejected_before_io() {
    let dir = tempdir().unwrap();
    // The file does not exist: an I/O error would mean the disk was touched.
    let fetcher = FileSystemFetcher::with_lanes(dir.path(), LaneRegistry::new());
    let def = AssetDefinition::new("theme", "theme.ogg", MediaKind::Audio);

    assert!(matches!(
        fetcher.fetch(&def).await,
        Err(LoadError::UnsupportedKind {
            kind: MediaKind::Audio,
            ..
        })
    ));
}
