// src/generator/config.rs

use crate::error::ConfigError;
use crate::map::GridEdge;
use crate::spawner::PrefabTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for one road network generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    // Grid
    pub grid_width: i32,
    pub grid_height: i32,
    /// World-space size of one cell. Opaque to the generator.
    pub tile_size: f32,

    // Main path
    pub start_edge: GridEdge,
    pub exit_edge: GridEdge,
    /// 0 walks greedily toward the exit, 1 walks completely at random.
    pub path_windingness: f32,
    pub min_path_length: usize,

    // Branches
    pub branch_probability: f32,
    pub min_branch_length: usize,
    pub max_branch_length: usize,
    pub max_branches: usize,

    /// Target fraction of grid cells occupied once branching stops.
    pub road_density: f32,

    /// 0 means "seed from OS entropy".
    pub random_seed: u64,
    /// Fraction of four-way junctions rendered as roundabouts.
    pub roundabout_probability: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            grid_width: 20,
            grid_height: 20,
            tile_size: 10.0,
            start_edge: GridEdge::North,
            exit_edge: GridEdge::South,
            path_windingness: 0.3,
            min_path_length: 5,
            branch_probability: 0.4,
            min_branch_length: 1,
            max_branch_length: 5,
            max_branches: 10,
            road_density: 0.5,
            random_seed: 0,
            roundabout_probability: 0.3,
        }
    }
}

impl GenerationConfig {
    /// Reject parameters the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width <= 0 {
            return Err(ConfigError::InvalidWidth(self.grid_width));
        }
        if self.grid_height <= 0 {
            return Err(ConfigError::InvalidHeight(self.grid_height));
        }
        if !(self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.min_path_length < 2 {
            return Err(ConfigError::MinPathLengthTooSmall(self.min_path_length));
        }
        if self.max_branch_length < self.min_branch_length {
            return Err(ConfigError::BranchLengthRange {
                min: self.min_branch_length,
                max: self.max_branch_length,
            });
        }
        Ok(())
    }

    /// `round(width * height * road_density)`.
    pub fn target_road_count(&self) -> usize {
        let cells = self.grid_width.max(0) as f64 * self.grid_height.max(0) as f64;
        (cells * self.road_density as f64).round().max(0.0) as usize
    }
}

/// Everything the command line front end reads from a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub prefabs: PrefabTable,
    /// Default `env_logger` filter; `RUST_LOG` still wins.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            generation: GenerationConfig::default(),
            prefabs: PrefabTable::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }
}
