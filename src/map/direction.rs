// src/map/direction.rs

use crate::utils::geometry::GridPos;
use serde::{Deserialize, Serialize};

/// An axis-aligned step on the grid. North is `+y`, East is `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Neighbor iteration order. Tie-breaks during path generation depend on it.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn offset(self) -> GridPos {
        match self {
            Direction::North => GridPos::new(0, 1),
            Direction::South => GridPos::new(0, -1),
            Direction::East => GridPos::new(1, 0),
            Direction::West => GridPos::new(-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

/// The side of the grid a start or exit cell is picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridEdge {
    /// Row `height - 1`.
    North,
    /// Row `0`.
    South,
    /// Column `width - 1`.
    East,
    /// Column `0`.
    West,
}

impl std::str::FromStr for GridEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(GridEdge::North),
            "south" | "s" => Ok(GridEdge::South),
            "east" | "e" => Ok(GridEdge::East),
            "west" | "w" => Ok(GridEdge::West),
            other => Err(format!("unknown grid edge '{}'", other)),
        }
    }
}
