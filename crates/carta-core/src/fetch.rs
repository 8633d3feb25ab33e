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

//! The boundary between the asset manager and whatever actually produces bytes.

use crate::asset::{AssetData, AssetDefinition};
use crate::error::LoadError;
use async_trait::async_trait;

/// Produces the decoded payload of an asset.
///
/// The asset manager drives every load through this trait and never touches
/// files or decoders itself. Bookkeeping (coalescing, concurrency limits,
/// timeouts, fallbacks) stays in the manager, so an implementation only has to
/// answer one question: what is in this asset?
///
/// Implementations must be cheap to call concurrently; the manager issues up
/// to `max_concurrent_loads` fetches at once.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetches and decodes the asset described by `definition`.
    ///
    /// # Errors
    /// Returns a [`LoadError`] naming `definition.key` if the source cannot be
    /// read or decoded.
    async fn fetch(&self, definition: &AssetDefinition) -> Result<AssetData, LoadError>;
}
