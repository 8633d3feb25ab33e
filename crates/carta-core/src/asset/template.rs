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

use super::{AssetDefinition, AssetPriority, MediaKind};
use serde::{Deserialize, Serialize};

/// A naming template that expands into a numbered family of definitions.
///
/// Biomes reference many near-identical assets (`tree1.png` .. `tree8.png`);
/// a template describes the family once and [`expand`](Self::expand) produces
/// the individual definitions on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeAssetTemplate {
    /// Category stamped on every generated definition.
    pub category: String,
    /// Key prefix; the index is appended to it.
    pub name_prefix: String,
    /// Directory the files live in, relative to the asset root.
    pub directory: String,
    /// File extension without the dot.
    pub extension: String,
    /// Number of variants, numbered from 1.
    pub count: u32,
    /// Media kind of every variant.
    #[serde(default = "default_kind")]
    pub kind: MediaKind,
    /// Priority of every variant.
    #[serde(default = "default_priority")]
    pub priority: AssetPriority,
}

fn default_kind() -> MediaKind {
    MediaKind::Image
}

fn default_priority() -> AssetPriority {
    AssetPriority::Low
}

impl BiomeAssetTemplate {
    /// Generates `name_prefix1 ..= name_prefix{count}`.
    pub fn expand(&self) -> Vec<AssetDefinition> {
        let directory = self.directory.trim_end_matches('/');
        (1..=self.count)
            .map(|index| {
                let key = format!("{}{}", self.name_prefix, index);
                let path = if directory.is_empty() {
                    format!("{key}.{}", self.extension)
                } else {
                    format!("{directory}/{key}.{}", self.extension)
                };
                AssetDefinition::new(key, path, self.kind)
                    .with_priority(self.priority)
                    .with_category(self.category.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_expand_numbers_from_one() {
        let template = BiomeAssetTemplate {
            category: "trees".to_string(),
            name_prefix: "tree".to_string(),
            directory: "environment/forest/".to_string(),
            extension: "png".to_string(),
            count: 3,
            kind: MediaKind::Image,
            priority: AssetPriority::Low,
        };

        let defs = template.expand();
        let keys: Vec<_> = defs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["tree1", "tree2", "tree3"]);
        assert_eq!(defs[2].path, Path::new("environment/forest/tree3.png"));
        assert_eq!(defs[0].category.as_deref(), Some("trees"));
        assert!(!defs[0].is_essential());
    }

    #[test]
    fn test_expand_empty_family() {
        let template: BiomeAssetTemplate = ron::from_str(
            r#"(category: "rocks", name_prefix: "rock", directory: "", extension: "png", count: 0)"#,
        )
        .unwrap();
        assert!(template.expand().is_empty());
        assert_eq!(template.priority, AssetPriority::Low);
    }
}
