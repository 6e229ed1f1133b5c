// src/grid/mod.rs
mod grid;
pub mod util;

pub use self::grid::{Grid, GridCell, Positions, RoadGrid};
