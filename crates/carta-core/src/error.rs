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

//! Error taxonomy of the asset pipeline.
//!
//! [`AssetError`] covers definitions that are malformed before any I/O happens.
//! [`LoadError`] covers everything that can go wrong while loading one asset.
//! `LoadError` is `Clone` because a single load outcome is shared by every
//! caller that asked for the same key.

use crate::asset::MediaKind;
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

/// A malformed asset definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// The media kind string is not one of the supported kinds.
    #[error("unknown media kind '{kind}'")]
    UnknownMediaKind {
        /// The rejected string.
        kind: String,
    },
    /// The priority string is not one of the supported priorities.
    #[error("unknown priority '{priority}'")]
    UnknownPriority {
        /// The rejected string.
        priority: String,
    },
    /// The definition has a blank key.
    #[error("asset at '{}' has an empty key", .path.display())]
    EmptyKey {
        /// Path of the offending definition.
        path: PathBuf,
    },
    /// The definition names itself as its fallback.
    #[error("asset '{key}' declares itself as its own fallback")]
    SelfFallback {
        /// The offending key.
        key: String,
    },
    /// A spritesheet has no frame geometry.
    #[error("spritesheet '{key}' has no frame configuration")]
    MissingFrameConfig {
        /// The offending key.
        key: String,
    },
    /// A spritesheet has unusable frame geometry.
    #[error("spritesheet '{key}' has an invalid frame configuration: {reason}")]
    InvalidFrameConfig {
        /// The offending key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// A failure to load a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No definition with this key is in the load queue.
    #[error("asset '{key}' is not in the load queue")]
    UnknownAsset {
        /// The requested key.
        key: String,
    },
    /// No loader lane handles this media kind.
    #[error("asset '{key}' has unsupported media kind '{kind}'")]
    UnsupportedKind {
        /// The asset key.
        key: String,
        /// Its media kind.
        kind: MediaKind,
    },
    /// The source file could not be read.
    #[error("failed to read '{}' for asset '{key}': {message}", .path.display())]
    Io {
        /// The asset key.
        key: String,
        /// The resolved file path.
        path: PathBuf,
        /// The underlying I/O error.
        message: String,
    },
    /// The bytes were read but could not be decoded.
    #[error("failed to decode asset '{key}': {message}")]
    Decode {
        /// The asset key.
        key: String,
        /// The decoder's error.
        message: String,
    },
    /// The fetch did not finish within the load budget.
    #[error("asset '{key}' timed out after {timeout:?}")]
    Timeout {
        /// The asset key.
        key: String,
        /// The budget that was exceeded.
        timeout: Duration,
    },
    /// The load task stopped without producing an outcome.
    #[error("load task for asset '{key}' failed: {message}")]
    Task {
        /// The asset key.
        key: String,
        /// The join error.
        message: String,
    },
    /// The manager was destroyed while the load was waiting or running.
    #[error("load of asset '{key}' was abandoned by a teardown")]
    Abandoned {
        /// The asset key.
        key: String,
    },
    /// The definition was rejected before loading.
    #[error("asset '{key}' is invalid: {source}")]
    Invalid {
        /// The asset key.
        key: String,
        /// The validation error.
        #[source]
        source: AssetError,
    },
}

impl LoadError {
    /// The key of the asset this error is about.
    pub fn key(&self) -> &str {
        match self {
            LoadError::UnknownAsset { key }
            | LoadError::UnsupportedKind { key, .. }
            | LoadError::Io { key, .. }
            | LoadError::Decode { key, .. }
            | LoadError::Timeout { key, .. }
            | LoadError::Task { key, .. }
            | LoadError::Abandoned { key }
            | LoadError::Invalid { key, .. } => key,
        }
    }

    /// Returns `true` for timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LoadError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::Timeout {
            key: "dialogues".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.key(), "dialogues");
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "asset 'dialogues' timed out after 10s");

        let err = LoadError::Io {
            key: "grass".to_string(),
            path: PathBuf::from("assets/grass.png"),
            message: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read 'assets/grass.png' for asset 'grass': not found"
        );
    }
}
