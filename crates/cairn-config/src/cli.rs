//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Cairn command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "cairn", about = "Voxel chunk mesh synthesizer")]
pub struct CliArgs {
    /// Cells per axis of every chunk.
    #[arg(long)]
    pub dimension: Option<usize>,

    /// Edge length of one cell in world units.
    #[arg(long)]
    pub unit_length: Option<f32>,

    /// Number of chunks to create.
    #[arg(long = "chunks")]
    pub chunk_count: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Triangle indices to pick in chunk 0, applied in order.
    #[arg(long, value_delimiter = ',')]
    pub pick: Vec<usize>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(dimension) = args.dimension {
            self.chunk.dimension = dimension;
        }
        if let Some(unit) = args.unit_length {
            self.chunk.unit_length = unit;
        }
        if let Some(count) = args.chunk_count {
            self.chunk.chunk_count = count;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
