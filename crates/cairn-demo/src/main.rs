//! Headless demo: builds chunk meshes from generated grids and applies picks.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p cairn-demo -- --dimension 3 --pick 0,12` to remove the
//! blocks owning triangles 0 and 12 of chunk 0, in that order.

use std::path::PathBuf;
use std::process::ExitCode;

use cairn_chunk::{
    ChunkError, ChunkStore, PickHit, RebuildCoordinator, RecordingConsumer, VoxelChunk,
    apply_pick,
};
use cairn_config::{CliArgs, Config, ConfigError};
use cairn_mesh::RemovedBlock;
use cairn_voxel::{ChunkId, GridEventBuffer};
use clap::Parser;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("no config directory available; pass --config")]
    NoConfigDir,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Chunk(#[from] ChunkError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok((config, config_dir)) => {
            let log_dir = config
                .debug
                .log_dir
                .clone()
                .unwrap_or_else(|| config_dir.join("logs"));
            cairn_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
            config
        }
        Err(e) => {
            eprintln!("cairn: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut render = RecordingConsumer::new();
    match run(&config, &args.pick, &mut render) {
        Ok(removed) => {
            for (chunk, stats) in render.iter() {
                info!(
                    chunk = %chunk,
                    vertices = stats.vertices,
                    triangles = stats.triangles,
                    rebuilds = stats.rebuilds,
                    edits = stats.edits,
                    "final mesh"
                );
            }
            info!(removed = removed.len(), "demo finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves the config directory, loads the config and applies CLI overrides.
fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), DemoError> {
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => cairn_config::default_config_dir().ok_or(DemoError::NoConfigDir)?,
    };

    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((config, config_dir))
}

/// Creates and meshes every configured chunk, then applies `picks` to chunk 0.
fn run(
    config: &Config,
    picks: &[usize],
    render: &mut RecordingConsumer,
) -> Result<Vec<RemovedBlock>, DemoError> {
    let chunk_config = &config.chunk;
    let mut store = ChunkStore::new();
    let mut events = GridEventBuffer::new();

    for id in 0..chunk_config.chunk_count {
        let mut chunk = VoxelChunk::new(
            ChunkId(id),
            chunk_config.dimension,
            chunk_config.unit_length,
        );
        chunk
            .populate(chunk_config.color, &mut events)
            .map_err(ChunkError::from)?;
        store.insert(chunk);
    }

    let mut coordinator = RebuildCoordinator::new();
    let rebuilt = coordinator.run(&mut store, &mut events, &mut [&mut *render]);
    info!(
        chunks = rebuilt,
        dimension = chunk_config.dimension,
        unit_length = chunk_config.unit_length,
        "chunk meshes built"
    );

    let mut removed = Vec::with_capacity(picks.len());
    for &triangle_index in picks {
        let hit = PickHit {
            chunk: ChunkId(0),
            triangle_index,
        };
        let removal = apply_pick(&mut store, hit, &mut [&mut *render])?;
        info!(
            triangle = triangle_index,
            block = %removal.block.index,
            triangles_removed = removal.triangle_run.len() / 3,
            vertices_removed = removal.vertex_count(),
            "picked"
        );
        removed.push(removal);
    }
    Ok(removed)
}
