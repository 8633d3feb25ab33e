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

//! Loads an asset manifest from disk the way the game does at startup and
//! prints what was loaded, what failed and which fallbacks were used.

use anyhow::{Context, Result};
use carta_agents::AssetManager;
use carta_core::{event::AssetEvent, LoaderConfig};
use carta_io::{load_config, load_manifest};
use carta_lanes::FileSystemFetcher;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Bulk-load an asset manifest and report the result")]
#[command(version)]
struct Cli {
    /// The RON asset manifest.
    #[arg(default_value = "sandbox/manifest.ron")]
    manifest: PathBuf,

    /// Directory the asset paths are resolved against.
    #[arg(short = 'r', long = "root", default_value = "sandbox/assets")]
    root: PathBuf,

    /// Optional RON loader configuration.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Also load the templates of this biome.
    #[arg(short = 'b', long = "biome")]
    biome: Option<String>,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => LoaderConfig::default(),
    };
    let manifest = load_manifest(&cli.manifest)
        .with_context(|| format!("failed to load manifest '{}'", cli.manifest.display()))?;

    let fetcher = Arc::new(FileSystemFetcher::new(&cli.root));
    let manager = AssetManager::from_manifest(fetcher, config, &manifest)?;

    let events = manager.subscribe();
    let progress = tokio::spawn(async move {
        while let Ok(event) = events.recv_async().await {
            match event {
                AssetEvent::FileComplete { key } => log::debug!("+ {key}"),
                AssetEvent::LoadError { key, error } => log::debug!("x {key}: {error}"),
                AssetEvent::FallbackUsed { key, fallback } => log::debug!("~ {key} -> {fallback}"),
                AssetEvent::Complete { .. } => break,
            }
        }
    });

    let result = manager.load_all_assets().await;
    progress.await.context("progress reporter panicked")?;

    println!("loaded:    {}", result.loaded_assets.join(", "));
    println!("failed:    {}", result.failed_assets.join(", "));
    for substitution in &result.fallbacks_used {
        println!("fallback:  {substitution}");
    }

    if let Err(error) = manager.preload_groups().await {
        log::error!("Preloading groups failed: {error}");
    }

    if let Some(biome) = &cli.biome {
        let keys = manager
            .load_biome_assets(biome, manifest.biome(biome))
            .await?;
        println!("biome {biome}: {}", keys.join(", "));
    }

    println!("stats:     {:?}", manager.stats());
    manager.destroy();

    anyhow::ensure!(result.success, "required assets could not be resolved");
    Ok(())
}
