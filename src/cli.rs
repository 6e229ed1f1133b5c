//! Command-line arguments for the `procedural_roads` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::generator::AppConfig;
use crate::map::GridEdge;
use crate::utils::util::clamp_unit;

/// Generate a procedural road network and print it.
///
/// CLI values override settings loaded from `--config`.
#[derive(Parser, Debug)]
#[command(name = "procedural_roads", about = "Procedural road network generator")]
pub struct CliArgs {
    /// JSON config file. Built-in defaults are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed (0 picks a fresh one).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Grid width in cells.
    #[arg(long)]
    pub width: Option<i32>,

    /// Grid height in cells.
    #[arg(long)]
    pub height: Option<i32>,

    /// Edge the main path starts on (north, south, east, west).
    #[arg(long)]
    pub start_edge: Option<GridEdge>,

    /// Edge the main path exits on.
    #[arg(long)]
    pub exit_edge: Option<GridEdge>,

    /// Path windingness, 0..1.
    #[arg(long)]
    pub windingness: Option<f32>,

    /// Target road density, 0..1.
    #[arg(long)]
    pub density: Option<f32>,

    /// Generate this many networks in parallel, seeds counting up from `--seed`.
    #[arg(long)]
    pub batch: Option<usize>,

    /// Write a PNG preview of the network to this path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Pixels per cell in the PNG preview.
    #[arg(long, default_value_t = 16)]
    pub cell_px: u32,

    /// Print stats as JSON instead of text.
    #[arg(long)]
    pub stats_json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(seed) = args.seed {
            generation.random_seed = seed;
        }
        if let Some(w) = args.width {
            generation.grid_width = w;
        }
        if let Some(h) = args.height {
            generation.grid_height = h;
        }
        if let Some(edge) = args.start_edge {
            generation.start_edge = edge;
        }
        if let Some(edge) = args.exit_edge {
            generation.exit_edge = edge;
        }
        if let Some(w) = args.windingness {
            generation.path_windingness = clamp_unit(w);
        }
        if let Some(d) = args.density {
            generation.road_density = clamp_unit(d);
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}
