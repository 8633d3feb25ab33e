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

use carta_agents::AssetManager;
use carta_core::{asset::AssetData, LoaderConfig};
use carta_io::load_manifest;
use carta_lanes::FileSystemFetcher;
use image::{Rgba, RgbaImage};
use std::{fs, path::Path, sync::Arc};
use tempfile::tempdir;

const MANIFEST: &str = r#"(
    assets: [
        (key: "dialogues", path: "data/dialogues.json", kind: "json",
         required: true, priority: "critical"),
        (key: "isa_happy", path: "characters/isa_happy.png", kind: "image",
         required: true, priority: "high"),
        (key: "isa_sad", path: "characters/isa_sad.png", kind: "image",
         required: true, fallback: "isa_happy"),
        (key: "stev_happy", path: "characters/stev_happy.png", kind: "image",
         required: true),
        (key: "ambient", path: "audio/ambient.ogg", kind: "audio"),
    ],
    groups: [
        (name: "terrain", preload: true, assets: [
            (key: "grass_middle", path: "terrain/grass_middle.png", kind: "image"),
        ]),
    ],
    biomes: {
        "forest": [(category: "trees", name_prefix: "tree", directory: "forest",
                    extension: "png", count: 2)],
    },
)"#;

fn write_png(root: &Path, relative: &str, color: [u8; 4]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(4, 4, Rgba(color)).save(path).unwrap();
}

fn write_file(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_manifest_driven_bulk_load_from_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "data/dialogues.json", br#"{"intro": ["Hola Isa"]}"#);
    write_png(root, "characters/isa_happy.png", [255, 105, 180, 255]);
    write_png(root, "terrain/grass_middle.png", [40, 160, 40, 255]);
    write_png(root, "forest/tree1.png", [20, 90, 20, 255]);
    write_png(root, "forest/tree2.png", [20, 90, 20, 255]);
    // isa_sad, stev_happy and ambient are missing on purpose.

    let manifest_path = root.join("manifest.ron");
    fs::write(&manifest_path, MANIFEST).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    let fetcher = Arc::new(FileSystemFetcher::new(root));
    let manager =
        AssetManager::from_manifest(fetcher, LoaderConfig::default(), &manifest).unwrap();

    let result = manager.load_all_assets().await;

    assert!(result.success, "unexpected failure: {result:?}");
    assert_eq!(result.loaded_assets, ["dialogues", "isa_happy"]);
    assert_eq!(result.failed_assets, ["isa_sad", "stev_happy", "ambient"]);
    assert!(result.used_fallback("isa_sad", "isa_happy"));
    assert!(result.used_fallback("stev_happy", "fallback_character_s"));
    assert_eq!(result.fallbacks_used.len(), 2);

    match manager.get("dialogues").as_deref() {
        Some(AssetData::Json(value)) => assert_eq!(value["intro"][0], "Hola Isa"),
        other => panic!("expected dialogue JSON, got {other:?}"),
    }
    let isa = manager.get("isa_happy").unwrap();
    let texture = isa.texture().unwrap();
    assert_eq!((texture.width, texture.height), (4, 4));
    assert_eq!(texture.pixel(0, 0), Some([255, 105, 180, 255]));

    manager.preload_groups().await.unwrap();
    assert!(manager.is_loaded("grass_middle"));

    let trees = manager
        .load_biome_assets("forest", manifest.biome("forest"))
        .await
        .unwrap();
    assert_eq!(trees, ["tree1", "tree2"]);
    assert!(manager.is_loaded("tree2"));

    // Leaving the forest: biome assets go, the core set and its stand-ins stay.
    assert_eq!(manager.cleanup_unused_assets(&[]), 2);
    assert!(!manager.is_loaded("tree1"));
    for key in ["dialogues", "grass_middle", "isa_happy", "isa_sad", "stev_happy"] {
        assert!(manager.get(key).is_some(), "{key} must survive cleanup");
    }
    assert_eq!(
        manager.substitution("stev_happy").as_deref(),
        Some("fallback_character_s")
    );
}

#[tokio::test]
async fn test_missing_required_json_fails_the_bulk_load() {
    let dir = tempdir().unwrap();
    let manifest = carta_io::AssetManifest::parse(
        r#"(assets: [(key: "dialogues", path: "data/dialogues.json", kind: "json", required: true)])"#,
    )
    .unwrap();

    let fetcher = Arc::new(FileSystemFetcher::new(dir.path()));
    let manager =
        AssetManager::from_manifest(fetcher, LoaderConfig::default(), &manifest).unwrap();

    let result = manager.load_all_assets().await;

    assert!(!result.success);
    assert_eq!(result.failed_assets, ["dialogues"]);
    assert!(matches!(
        manager.load_asset("dialogues").await,
        Err(carta_core::LoadError::Io { .. })
    ));
}
