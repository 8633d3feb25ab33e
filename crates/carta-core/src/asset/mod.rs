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

//! Provides the data model shared by every stage of the asset pipeline.
//!
//! This module is the "common language" of asset loading. It knows what an
//! asset *is* (a declaration in a catalog, a decoded payload, a handle to a
//! cached copy) but nothing about how bytes are read or decoded.
//!
//! The key components are:
//! - [`AssetDefinition`]: the declarative description of one asset.
//! - [`AssetData`]: the decoded payload produced by a loader lane.
//! - [`FallbackKind`]: the classification used to draw placeholders.
//! - [`LoadResult`]: the aggregate outcome of a bulk load.

mod data;
mod definition;
mod fallback;
mod handle;
mod result;
mod template;

pub use data::*;
pub use definition::*;
pub use fallback::*;
pub use handle::*;
pub use result::*;
pub use template::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits allow decoded assets to be produced on a worker thread
/// and shared with every consumer through an [`AssetHandle`].
///
/// # Examples
///
/// ```
/// use carta_core::asset::Asset;
///
/// struct Portrait {
///     pixels: Vec<u8>,
/// }
///
/// impl Asset for Portrait {}
/// ```
pub trait Asset: Send + Sync + 'static {}
