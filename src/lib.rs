// src/lib.rs
//! Seedable procedural road networks on a 2D grid.
//!
//! A [`generator::RoadNetworkGenerator`] walks a main path between two grid
//! edges, grows dead-end branches off it, classifies every road cell into a
//! typed and rotated tile, and hands the finished grid to a
//! [`spawner::RoadSpawner`] for placement.

pub mod cli;
pub mod error;
pub mod generator;
pub mod grid;
pub mod map;
pub mod preview;
pub mod spawner;
pub mod utils;

pub use error::{ConfigError, GridError, RoadGenError};
