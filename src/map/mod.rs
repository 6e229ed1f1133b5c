// src/map/mod.rs
pub mod direction;
pub mod tile;

pub use direction::{Direction, GridEdge};
pub use tile::{InstanceId, RoadTile, TileType};
