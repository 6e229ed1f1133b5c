// src/generator/classify.rs

use crate::error::GridError;
use crate::grid::util::has_road_neighbor;
use crate::grid::RoadGrid;
use crate::map::{Direction, RoadTile, TileType};
use crate::utils::geometry::GridPos;
use rand::rngs::StdRng;
use rand::Rng;

/// Turns an occupied cell into a typed, rotated road tile.
pub trait TileClassifier {
    /// Classify the cell at `position` from the occupancy of its four
    /// neighbors. Reads the grid only; the caller writes the result back.
    fn determine_tile_type(
        &self,
        grid: &RoadGrid,
        position: GridPos,
        roundabout_probability: f32,
        rng: &mut StdRng,
    ) -> Result<RoadTile, GridError>;
}

/// Classifier for prefabs authored in these base orientations at 0°:
/// dead end open to the north, corner joining north and east, T-junction
/// open on all sides but the south.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborClassifier;

impl NeighborClassifier {
    pub fn new() -> Self {
        NeighborClassifier
    }
}

impl TileClassifier for NeighborClassifier {
    fn determine_tile_type(
        &self,
        grid: &RoadGrid,
        position: GridPos,
        roundabout_probability: f32,
        rng: &mut StdRng,
    ) -> Result<RoadTile, GridError> {
        let mut tile = grid.at(position)?.clone();
        if tile.is_empty() || tile.is_special() {
            return Ok(tile);
        }

        let north = has_road_neighbor(grid, position, Direction::North);
        let south = has_road_neighbor(grid, position, Direction::South);
        let east = has_road_neighbor(grid, position, Direction::East);
        let west = has_road_neighbor(grid, position, Direction::West);

        tile.connects_north = north;
        tile.connects_south = south;
        tile.connects_east = east;
        tile.connects_west = west;

        match tile.connection_count() {
            1 => {
                tile.tile_type = TileType::DeadEnd;
                tile.rotation = dead_end_rotation(north, south, east, west);
            }
            2 if (north && south) || (east && west) => {
                tile.tile_type = TileType::Straight;
                tile.rotation = if north && south { 0 } else { 90 };
            }
            2 => {
                tile.tile_type = TileType::Corner;
                tile.rotation = corner_rotation(north, south, east, west);
            }
            3 => {
                tile.tile_type = TileType::TIntersection;
                tile.rotation = t_intersection_rotation(north, south, east, west);
            }
            4 => {
                tile.tile_type = if rng.random::<f64>() < roundabout_probability as f64 {
                    TileType::Roundabout
                } else {
                    TileType::FourWay
                };
                tile.rotation = 0;
            }
            // An isolated occupied cell has no road shape.
            _ => {
                tile.tile_type = TileType::None;
                tile.rotation = 0;
            }
        }

        Ok(tile)
    }
}

/// Points the open side: N 0, E 90, S 180, W 270.
fn dead_end_rotation(north: bool, south: bool, east: bool, west: bool) -> u16 {
    if north {
        0
    } else if east {
        90
    } else if south {
        180
    } else if west {
        270
    } else {
        0
    }
}

fn corner_rotation(north: bool, south: bool, east: bool, west: bool) -> u16 {
    match (north, east, south, west) {
        (true, true, false, false) => 0,
        (false, true, true, false) => 90,
        (false, false, true, true) => 180,
        (true, false, false, true) => 270,
        _ => 0,
    }
}

/// Keyed on the closed side: S 0, W 90, N 180, E 270.
fn t_intersection_rotation(north: bool, south: bool, east: bool, west: bool) -> u16 {
    if !south {
        0
    } else if !west {
        90
    } else if !north {
        180
    } else if !east {
        270
    } else {
        0
    }
}

/// Classify every occupied cell in place, in grid order.
pub fn classify_grid(
    grid: &mut RoadGrid,
    classifier: &dyn TileClassifier,
    roundabout_probability: f32,
    rng: &mut StdRng,
) -> Result<(), GridError> {
    for pos in grid.all_positions() {
        if grid.at(pos)?.is_empty() {
            continue;
        }
        let tile = classifier.determine_tile_type(grid, pos, roundabout_probability, rng)?;
        grid.set(pos.x, pos.y, tile)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn set_tile(grid: &mut RoadGrid, x: i32, y: i32, tile_type: TileType) {
        grid.get_mut(x, y).unwrap().tile_type = tile_type;
    }

    /// 3x3 grid with the center occupied plus the given neighbors.
    fn center_with(dirs: &[Direction]) -> RoadGrid {
        let mut grid = RoadGrid::new(3, 3).unwrap();
        set_tile(&mut grid, 1, 1, TileType::Straight);
        for dir in dirs {
            let n = GridPos::new(1, 1) + dir.offset();
            set_tile(&mut grid, n.x, n.y, TileType::Straight);
        }
        grid
    }

    fn classify(grid: &RoadGrid, roundabout_probability: f32) -> RoadTile {
        NeighborClassifier::new()
            .determine_tile_type(
                grid,
                GridPos::new(1, 1),
                roundabout_probability,
                &mut StdRng::seed_from_u64(0),
            )
            .unwrap()
    }

    #[test]
    fn test_two_opposite_connections_is_straight() {
        let tile = classify(&center_with(&[Direction::North, Direction::South]), 0.0);
        assert_eq!(tile.tile_type, TileType::Straight);
        assert_eq!(tile.rotation, 0);

        let tile = classify(&center_with(&[Direction::East, Direction::West]), 0.0);
        assert_eq!(tile.tile_type, TileType::Straight);
        assert_eq!(tile.rotation, 90);
    }

    #[test]
    fn test_corner_rotations() {
        use crate::map::Direction::*;
        let cases = [
            ([North, East], 0),
            ([East, South], 90),
            ([South, West], 180),
            ([West, North], 270),
        ];
        for (dirs, rotation) in cases {
            let tile = classify(&center_with(&dirs), 0.0);
            assert_eq!(tile.tile_type, TileType::Corner, "{:?}", dirs);
            assert_eq!(tile.rotation, rotation, "{:?}", dirs);
        }
    }

    #[test]
    fn test_t_intersection_rotations() {
        use crate::map::Direction::*;
        let cases = [
            ([North, East, West], 0),   // south closed
            ([North, South, East], 90), // west closed
            ([South, East, West], 180), // north closed
            ([North, South, West], 270), // east closed
        ];
        for (dirs, rotation) in cases {
            let tile = classify(&center_with(&dirs), 0.0);
            assert_eq!(tile.tile_type, TileType::TIntersection, "{:?}", dirs);
            assert_eq!(tile.rotation, rotation, "{:?}", dirs);
            assert_eq!(tile.connection_count(), 3);
        }
    }

    #[test]
    fn test_dead_end_rotations() {
        use crate::map::Direction::*;
        for (dir, rotation) in [(North, 0), (East, 90), (South, 180), (West, 270)] {
            let tile = classify(&center_with(&[dir]), 0.0);
            assert_eq!(tile.tile_type, TileType::DeadEnd);
            assert_eq!(tile.rotation, rotation);
            assert!(tile.connects(dir));
        }
    }

    #[test]
    fn test_four_way_or_roundabout() {
        let grid = center_with(&Direction::ALL);

        let tile = classify(&grid, 0.0);
        assert_eq!(tile.tile_type, TileType::FourWay);
        assert_eq!(tile.rotation, 0);

        let tile = classify(&grid, 1.0);
        assert_eq!(tile.tile_type, TileType::Roundabout);
    }

    #[test]
    fn test_special_and_empty_tiles_are_untouched() {
        let mut grid = center_with(&[Direction::North, Direction::East]);
        set_tile(&mut grid, 1, 1, TileType::Start);
        let tile = classify(&grid, 0.0);
        assert_eq!(tile.tile_type, TileType::Start);
        assert!(!tile.connects_north);

        let grid = RoadGrid::new(3, 3).unwrap();
        assert_eq!(classify(&grid, 0.0), RoadTile::empty(1, 1));
    }

    #[test]
    fn test_isolated_cell_does_not_panic() {
        let tile = classify(&center_with(&[]), 0.0);
        assert_eq!(tile.tile_type, TileType::None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let grid = center_with(&[Direction::South, Direction::East, Direction::West]);
        let first = classify(&grid, 0.5);
        let mut reclassified = grid.clone();
        reclassified.set(1, 1, first.clone()).unwrap();
        assert_eq!(classify(&reclassified, 0.5), first);
    }

    #[test]
    fn test_out_of_bounds_position_is_an_error() {
        let grid = RoadGrid::new(3, 3).unwrap();
        let result = NeighborClassifier::new().determine_tile_type(
            &grid,
            GridPos::new(3, 0),
            0.0,
            &mut StdRng::seed_from_u64(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_classify_grid_uses_final_occupancy() {
        // An L-shaped road: (0,0) -> (1,0) -> (1,1).
        let mut grid = RoadGrid::new(3, 3).unwrap();
        for (x, y) in [(0, 0), (1, 0), (1, 1)] {
            set_tile(&mut grid, x, y, TileType::Straight);
        }
        let mut rng = StdRng::seed_from_u64(0);
        classify_grid(&mut grid, &NeighborClassifier::new(), 0.0, &mut rng).unwrap();

        assert_eq!(grid.get(0, 0).unwrap().tile_type, TileType::DeadEnd);
        assert_eq!(grid.get(0, 0).unwrap().rotation, 90);
        let corner = grid.get(1, 0).unwrap();
        assert_eq!(corner.tile_type, TileType::Corner);
        assert_eq!(corner.rotation, 270);
        assert_eq!(grid.get(1, 1).unwrap().rotation, 180);
        assert!(grid.get(2, 2).unwrap().is_empty());
    }
}
