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

//! Asynchronous access to asset files below a root directory.

use carta_core::{asset::AssetDefinition, LoadError};
use std::path::{Component, Path, PathBuf};

/// Reads asset source files relative to a root directory.
#[derive(Debug, Clone)]
pub struct AssetReader {
    root: PathBuf,
}

impl AssetReader {
    /// Creates a reader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the definition's path against the root.
    ///
    /// Paths that try to climb out of the root with `..` are rejected, as are
    /// absolute paths.
    pub fn resolve(&self, definition: &AssetDefinition) -> Result<PathBuf, LoadError> {
        let escapes = definition.path.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(LoadError::Io {
                key: definition.key.clone(),
                path: definition.path.clone(),
                message: "path escapes the asset root".to_string(),
            });
        }
        Ok(self.root.join(&definition.path))
    }

    /// Reads the whole source file of `definition`.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the path is rejected or the read fails.
    pub async fn read(&self, definition: &AssetDefinition) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(definition)?;
        log::trace!("Reading '{}' for asset '{}'", path.display(), definition.key);

        tokio::fs::read(&path).await.map_err(|e| LoadError::Io {
            key: definition.key.clone(),
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/dialogues.json"), b"{}").unwrap();

        let reader = AssetReader::new(dir.path());
        let def = AssetDefinition::new(
            "dialogues",
            "data/dialogues.json",
            carta_core::asset::MediaKind::Json,
        );
        assert_eq!(reader.read(&def).await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let reader = AssetReader::new(dir.path());
        let def = AssetDefinition::image("ghost", "nowhere/ghost.png");

        match reader.read(&def).await {
            Err(LoadError::Io { key, path, .. }) => {
                assert_eq!(key, "ghost");
                assert!(path.ends_with("nowhere/ghost.png"));
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_escaping_paths() {
        let reader = AssetReader::new("assets");
        let def = AssetDefinition::image("secret", "../secret.png");
        assert!(matches!(reader.resolve(&def), Err(LoadError::Io { .. })));

        let def = AssetDefinition::image("grass", "terrain/grass.png");
        assert_eq!(
            reader.resolve(&def).unwrap(),
            Path::new("assets/terrain/grass.png")
        );
    }
}
