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

//! Acts as the agent for the asset subsystem.
//!
//! This module is the public-facing API for requesting assets and querying
//! their state. It decides *when* and *how many* assets are loaded, and what
//! happens when one is missing; the lanes decide *how* bytes become assets.
//!
//! Responsibilities, all owned by one [`AssetManager`] instance:
//! - a keyed load queue with request coalescing,
//! - a global cap on simultaneous fetches and a per-fetch time budget,
//! - named groups and biome families for staged loading,
//! - bulk loading of the static catalog with fallback resolution,
//! - caller-triggered eviction and full teardown.

mod bulk;
mod groups;
mod manager;
mod state;

pub use manager::AssetManager;
pub use state::LoadOutcome;
