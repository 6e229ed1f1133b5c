// src/error.rs

use crate::utils::geometry::GridPos;
use thiserror::Error;

/// Out-of-range grid access or an impossible grid shape. Reaching either from
/// generator code indicates broken coordinate arithmetic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("position {pos} is out of bounds for a {width}x{height} grid")]
    OutOfBounds { pos: GridPos, width: i32, height: i32 },

    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Invalid generation parameters. Raised before any grid work happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid width must be positive (got {0})")]
    InvalidWidth(i32),

    #[error("grid height must be positive (got {0})")]
    InvalidHeight(i32),

    #[error("tile size must be positive (got {0})")]
    InvalidTileSize(f32),

    #[error("min path length must be at least 2 (got {0})")]
    MinPathLengthTooSmall(usize),

    #[error("max branch length ({max}) must be >= min branch length ({min})")]
    BranchLengthRange { min: usize, max: usize },

    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Top-level error for a generation run.
#[derive(Debug, Error)]
pub enum RoadGenError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to generate a main path after {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    #[error("road placement failed: {0}")]
    Spawn(String),

    #[error("failed to write preview image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
