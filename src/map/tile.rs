// src/map/tile.rs

use crate::map::Direction;
use crate::utils::geometry::GridPos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Topological classification of a road cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    None,
    Straight,
    Corner,
    TIntersection,
    FourWay,
    Roundabout,
    /// Single-connection terminus, usually the tip of a branch.
    DeadEnd,
    Start,
    Exit,
}

impl TileType {
    pub const ALL: [TileType; 9] = [
        TileType::None,
        TileType::Straight,
        TileType::Corner,
        TileType::TIntersection,
        TileType::FourWay,
        TileType::Roundabout,
        TileType::DeadEnd,
        TileType::Start,
        TileType::Exit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TileType::None => "None",
            TileType::Straight => "Straight",
            TileType::Corner => "Corner",
            TileType::TIntersection => "TIntersection",
            TileType::FourWay => "FourWay",
            TileType::Roundabout => "Roundabout",
            TileType::DeadEnd => "DeadEnd",
            TileType::Start => "Start",
            TileType::Exit => "Exit",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-owning handle to an object placed by a [`crate::spawner::RoadSpawner`].
/// The spawner owns the object; the grid only remembers which one it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

/// Per-cell road data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoadTile {
    pub tile_type: TileType,
    /// Degrees around the vertical axis: 0, 90, 180 or 270.
    pub rotation: u16,
    pub position: GridPos,
    pub is_main_path: bool,

    // Filled in by classification.
    pub connects_north: bool,
    pub connects_south: bool,
    pub connects_east: bool,
    pub connects_west: bool,

    #[serde(skip)]
    pub instance: Option<InstanceId>,
}

impl RoadTile {
    /// An unoccupied cell at `(x, y)`.
    pub fn empty(x: i32, y: i32) -> Self {
        RoadTile {
            position: GridPos::new(x, y),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tile_type == TileType::None
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_intersection(&self) -> bool {
        matches!(
            self.tile_type,
            TileType::TIntersection | TileType::FourWay | TileType::Roundabout
        )
    }

    /// Start and Exit cells are fixed by the orchestrator and never reclassified.
    pub fn is_special(&self) -> bool {
        matches!(self.tile_type, TileType::Start | TileType::Exit)
    }

    pub fn connects(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.connects_north,
            Direction::South => self.connects_south,
            Direction::East => self.connects_east,
            Direction::West => self.connects_west,
        }
    }

    pub fn connection_count(&self) -> usize {
        Direction::ALL.iter().filter(|d| self.connects(**d)).count()
    }
}
