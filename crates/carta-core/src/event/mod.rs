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

//! Provides the event channel used to report loading progress.
//!
//! The asset manager publishes an [`AssetEvent`] for every settled file and
//! once per bulk load. Loading screens subscribe to the [`EventBus`] and
//! drain their receiver at their own pace.

mod bus;

pub use self::bus::EventBus;

use crate::error::LoadError;

/// Progress notifications emitted by the asset manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEvent {
    /// An asset finished loading and is in the cache.
    FileComplete {
        /// The asset key.
        key: String,
    },
    /// An asset failed or timed out.
    LoadError {
        /// The asset key.
        key: String,
        /// What went wrong.
        error: LoadError,
    },
    /// A failed asset was substituted.
    FallbackUsed {
        /// The failed asset key.
        key: String,
        /// The substitute key.
        fallback: String,
    },
    /// A bulk load settled.
    Complete {
        /// Number of loaded assets.
        loaded: usize,
        /// Number of failed assets.
        failed: usize,
    },
}
