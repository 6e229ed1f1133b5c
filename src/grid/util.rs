// src/grid/util.rs
// Neighborhood queries and grid <-> world conversions.

use crate::generator::GenerationConfig;
use crate::grid::RoadGrid;
use crate::map::{Direction, GridEdge, RoadTile};
use crate::utils::geometry::{GridPos, WorldPos};
use rand::Rng;

pub fn neighbor_in_direction(pos: GridPos, dir: Direction) -> GridPos {
    pos + dir.offset()
}

/// In-bounds axis neighbors of `pos`, in [`Direction::ALL`] order.
pub fn neighbors(grid: &RoadGrid, pos: GridPos) -> Vec<GridPos> {
    Direction::ALL
        .iter()
        .map(|d| neighbor_in_direction(pos, *d))
        .filter(|n| grid.contains(*n))
        .collect()
}

/// Directions from `pos` that lead to an in-bounds, unoccupied cell.
pub fn available_directions(grid: &RoadGrid, pos: GridPos) -> Vec<Direction> {
    Direction::ALL
        .iter()
        .copied()
        .filter(|d| grid.is_free(neighbor_in_direction(pos, *d)))
        .collect()
}

/// `true` if the neighbor in `dir` is inside the grid and holds road.
pub fn has_road_neighbor(grid: &RoadGrid, pos: GridPos, dir: Direction) -> bool {
    grid.is_occupied(neighbor_in_direction(pos, dir))
}

/// Pick a uniformly random cell on `edge`.
pub fn random_edge_position<R: Rng + ?Sized>(
    edge: GridEdge,
    width: i32,
    height: i32,
    rng: &mut R,
) -> GridPos {
    match edge {
        GridEdge::North => GridPos::new(rng.random_range(0..width), height - 1),
        GridEdge::South => GridPos::new(rng.random_range(0..width), 0),
        GridEdge::East => GridPos::new(width - 1, rng.random_range(0..height)),
        GridEdge::West => GridPos::new(0, rng.random_range(0..height)),
    }
}

/// World-space center of cell `(x, y)`, with the grid centered on the origin.
pub fn grid_to_world(x: i32, y: i32, config: &GenerationConfig) -> WorldPos {
    let world_x = (x as f32 - config.grid_width as f32 / 2.0) * config.tile_size;
    let world_z = (y as f32 - config.grid_height as f32 / 2.0) * config.tile_size;
    WorldPos::new(world_x, 0.0, world_z)
}

/// Nearest cell to a world-space point. May lie outside the grid.
pub fn world_to_grid(world: WorldPos, config: &GenerationConfig) -> GridPos {
    let x = (world.x / config.tile_size + config.grid_width as f32 / 2.0).round() as i32;
    let y = (world.z / config.tile_size + config.grid_height as f32 / 2.0).round() as i32;
    GridPos::new(x, y)
}

/// Midpoint of the tile's edge facing `dir`, in world space.
pub fn connection_point(tile: &RoadTile, dir: Direction, config: &GenerationConfig) -> WorldPos {
    let center = grid_to_world(tile.position.x, tile.position.y, config);
    let half = config.tile_size / 2.0;
    let offset = match dir {
        Direction::North => WorldPos::new(0.0, 0.0, half),
        Direction::South => WorldPos::new(0.0, 0.0, -half),
        Direction::East => WorldPos::new(half, 0.0, 0.0),
        Direction::West => WorldPos::new(-half, 0.0, 0.0),
    };
    center + offset
}
