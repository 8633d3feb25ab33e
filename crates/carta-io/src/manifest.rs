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

//! The declarative asset manifest and the loader configuration file.
//!
//! Both files are written in RON. Media kinds and priorities are plain strings
//! in the manifest so that a typo is reported with the key of the offending
//! entry rather than as a bare deserialization error.
//!
//! ```ron
//! (
//!     assets: [
//!         (key: "dialogues", path: "data/dialogues.json", kind: "json",
//!          required: true, priority: "critical"),
//!         (key: "isa_happy", path: "characters/isa_happy.png", kind: "image",
//!          required: true, fallback: "isa_neutral"),
//!     ],
//!     groups: [
//!         (name: "terrain", preload: true, assets: [
//!             (key: "grass_middle", path: "terrain/grass_middle.png", kind: "image"),
//!         ]),
//!     ],
//!     biomes: {
//!         "forest": [(category: "trees", name_prefix: "tree", directory: "forest",
//!                     extension: "png", count: 4)],
//!     },
//! )
//! ```

use carta_core::{
    asset::{
        AssetDefinition, AssetGroup, AssetPriority, BiomeAssetTemplate, FrameConfig, MediaKind,
    },
    AssetError, LoaderConfig,
};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// A failure to load a manifest or configuration file.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid RON for the expected structure.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// An entry is syntactically valid but semantically wrong.
    #[error("invalid asset entry '{key}': {source}")]
    InvalidAsset {
        /// Key of the offending entry.
        key: String,
        /// What is wrong with it.
        #[source]
        source: AssetError,
    },
    /// Two groups share a name.
    #[error("group '{0}' is declared more than once")]
    DuplicateGroup(String),
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    key: String,
    path: PathBuf,
    kind: String,
    #[serde(default)]
    fallback: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    frame: Option<FrameConfig>,
}

impl RawAsset {
    fn into_definition(self) -> Result<AssetDefinition, ManifestError> {
        let invalid = |key: &str, source| ManifestError::InvalidAsset {
            key: key.to_string(),
            source,
        };

        let kind: MediaKind = self.kind.parse().map_err(|e| invalid(&self.key, e))?;
        let priority = match &self.priority {
            Some(priority) => priority.parse().map_err(|e| invalid(&self.key, e))?,
            None => AssetPriority::default(),
        };

        let definition = AssetDefinition {
            key: self.key,
            path: self.path,
            kind,
            fallback: self.fallback,
            required: self.required,
            priority,
            category: self.category,
            frame: self.frame,
        };
        definition
            .validate()
            .map_err(|e| invalid(&definition.key, e))?;
        Ok(definition)
    }
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    name: String,
    #[serde(default)]
    preload: bool,
    #[serde(default)]
    assets: Vec<RawAsset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawManifest {
    assets: Vec<RawAsset>,
    groups: Vec<RawGroup>,
    biomes: BTreeMap<String, Vec<BiomeAssetTemplate>>,
}

/// A validated asset manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetManifest {
    /// The static catalog loaded by a bulk load.
    pub assets: Vec<AssetDefinition>,
    /// Named groups for staged loading.
    pub groups: Vec<AssetGroup>,
    /// Per-biome asset families.
    pub biomes: BTreeMap<String, Vec<BiomeAssetTemplate>>,
}

impl AssetManifest {
    /// Parses and validates a manifest from RON text.
    ///
    /// # Errors
    /// Returns a [`ManifestError`] for syntax errors, unknown media kinds or
    /// priorities, invalid definitions and duplicate group names.
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = ron_options().from_str(source)?;

        let assets = raw
            .assets
            .into_iter()
            .map(RawAsset::into_definition)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(raw.groups.len());
        for group in raw.groups {
            if !seen.insert(group.name.clone()) {
                return Err(ManifestError::DuplicateGroup(group.name));
            }
            groups.push(AssetGroup {
                name: group.name,
                preload: group.preload,
                assets: group
                    .assets
                    .into_iter()
                    .map(RawAsset::into_definition)
                    .collect::<Result<Vec<_>, _>>()?,
            });
        }

        let mut catalog_keys = HashSet::new();
        for def in &assets {
            if !catalog_keys.insert(def.key.as_str()) {
                log::warn!(
                    "Asset key '{}' is declared twice in the catalog; the last entry wins.",
                    def.key
                );
            }
        }

        Ok(Self {
            assets,
            groups,
            biomes: raw.biomes,
        })
    }

    /// Returns the templates of `biome`, or an empty slice.
    pub fn biome(&self, biome: &str) -> &[BiomeAssetTemplate] {
        self.biomes.get(biome).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reads and validates a manifest file.
///
/// # Errors
/// See [`AssetManifest::parse`]; I/O failures are reported as [`ManifestError::Io`].
pub fn load_manifest(path: impl AsRef<Path>) -> Result<AssetManifest, ManifestError> {
    let path = path.as_ref();
    let source = read_to_string(path)?;
    let manifest = AssetManifest::parse(&source)?;
    log::info!(
        "Loaded manifest '{}': {} assets, {} groups, {} biomes",
        path.display(),
        manifest.assets.len(),
        manifest.groups.len(),
        manifest.biomes.len()
    );
    Ok(manifest)
}

/// Reads a [`LoaderConfig`] from a RON file. Missing fields keep their defaults.
///
/// # Errors
/// Returns [`ManifestError::Io`] or [`ManifestError::Parse`].
pub fn load_config(path: impl AsRef<Path>) -> Result<LoaderConfig, ManifestError> {
    let source = read_to_string(path.as_ref())?;
    Ok(ron_options().from_str(&source)?)
}

/// Optional fields are written bare (`fallback: "isa_happy"`), not as `Some(..)`.
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_to_string(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"(
        assets: [
            (key: "dialogues", path: "data/dialogues.json", kind: "json",
             required: true, priority: "critical"),
            (key: "isa_walk", path: "characters/isa_walk.png", kind: "spritesheet",
             frame: (frame_width: 32, frame_height: 48)),
            (key: "isa_happy", path: "characters/isa_happy.png", kind: "IMAGE",
             required: true, fallback: "isa_walk"),
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

    #[test]
    fn test_parse_full_manifest() {
        let manifest = AssetManifest::parse(MANIFEST).unwrap();

        assert_eq!(manifest.assets.len(), 3);
        let dialogues = &manifest.assets[0];
        assert_eq!(dialogues.kind, MediaKind::Json);
        assert_eq!(dialogues.priority, AssetPriority::Critical);
        assert!(dialogues.is_essential());

        let walk = &manifest.assets[1];
        assert_eq!(walk.frame, Some(FrameConfig::new(32, 48)));
        assert_eq!(manifest.assets[2].fallback.as_deref(), Some("isa_walk"));

        assert_eq!(manifest.groups.len(), 1);
        assert!(manifest.groups[0].preload);
        assert!(manifest.groups[0].contains("grass_middle"));

        assert_eq!(manifest.biome("forest").len(), 1);
        assert!(manifest.biome("desert").is_empty());
    }

    #[test]
    fn test_optional_fields_are_written_bare() {
        let source = r#"(assets: [
            (key: "stev_sad", path: "stev_sad.png", kind: "image", fallback: "stev_happy",
             priority: "low", category: "characters",
             frame: (frame_width: 8, frame_height: 8, end_frame: 3)),
        ])"#;

        let manifest = AssetManifest::parse(source).unwrap();

        let stev = &manifest.assets[0];
        assert_eq!(stev.fallback.as_deref(), Some("stev_happy"));
        assert_eq!(stev.priority, AssetPriority::Low);
        assert_eq!(stev.category.as_deref(), Some("characters"));
        assert_eq!(stev.frame.and_then(|frame| frame.end_frame), Some(3));
    }

    #[test]
    fn test_unknown_media_kind_names_the_entry() {
        let source = r#"(assets: [(key: "intro", path: "intro.mp4", kind: "video")])"#;
        match AssetManifest::parse(source) {
            Err(ManifestError::InvalidAsset { key, source }) => {
                assert_eq!(key, "intro");
                assert!(matches!(source, AssetError::UnknownMediaKind { .. }));
            }
            other => panic!("expected an invalid asset error, got {other:?}"),
        }
    }

    #[test]
    fn test_spritesheet_without_frames_is_rejected() {
        let source = r#"(assets: [(key: "walk", path: "walk.png", kind: "spritesheet")])"#;
        assert!(matches!(
            AssetManifest::parse(source),
            Err(ManifestError::InvalidAsset {
                source: AssetError::MissingFrameConfig { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_group_is_rejected() {
        let source = r#"(groups: [(name: "ui"), (name: "ui")])"#;
        assert!(matches!(
            AssetManifest::parse(source),
            Err(ManifestError::DuplicateGroup(name)) if name == "ui"
        ));
    }

    #[test]
    fn test_load_files_from_disk() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("manifest.ron");
        let config_path = dir.path().join("loader.ron");
        std::fs::write(&manifest_path, MANIFEST).unwrap();
        std::fs::write(&config_path, "(max_concurrent_loads: 2)").unwrap();

        let manifest = load_manifest(&manifest_path).unwrap();
        assert_eq!(manifest.assets.len(), 3);

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.max_concurrent_loads, 2);
        assert_eq!(config.load_timeout_ms, 10_000);

        assert!(matches!(
            load_manifest(dir.path().join("missing.ron")),
            Err(ManifestError::Io { .. })
        ));
    }
}
