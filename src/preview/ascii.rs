// src/preview/ascii.rs

use crate::grid::RoadGrid;
use crate::map::{RoadTile, TileType};

/// Box-drawing glyph for a classified tile.
pub fn tile_glyph(tile: &RoadTile) -> char {
    match (tile.tile_type, tile.rotation) {
        (TileType::None, _) => '.',
        (TileType::Start, _) => 'S',
        (TileType::Exit, _) => 'E',
        (TileType::Straight, 90) | (TileType::Straight, 270) => '─',
        (TileType::Straight, _) => '│',
        (TileType::Corner, 90) => '┌',
        (TileType::Corner, 180) => '┐',
        (TileType::Corner, 270) => '┘',
        (TileType::Corner, _) => '└',
        (TileType::TIntersection, 90) => '├',
        (TileType::TIntersection, 180) => '┬',
        (TileType::TIntersection, 270) => '┤',
        (TileType::TIntersection, _) => '┴',
        (TileType::FourWay, _) => '┼',
        (TileType::Roundabout, _) => 'O',
        (TileType::DeadEnd, 90) => '╶',
        (TileType::DeadEnd, 180) => '╷',
        (TileType::DeadEnd, 270) => '╴',
        (TileType::DeadEnd, _) => '╵',
    }
}

/// One line per row, highest `y` first so north is up.
pub fn render_ascii(grid: &RoadGrid) -> String {
    let mut out = String::with_capacity(grid.len() * 4 + grid.height() as usize);
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            match grid.get(x, y) {
                Ok(tile) => out.push(tile_glyph(tile)),
                Err(_) => out.push('?'),
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{classify_grid, NeighborClassifier};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_render_small_network() {
        // S at the top-left, a corner, then east to the exit.
        let mut grid = RoadGrid::new(3, 2).unwrap();
        grid.get_mut(0, 1).unwrap().tile_type = TileType::Start;
        grid.get_mut(0, 0).unwrap().tile_type = TileType::Straight;
        grid.get_mut(1, 0).unwrap().tile_type = TileType::Straight;
        grid.get_mut(2, 0).unwrap().tile_type = TileType::Exit;
        classify_grid(
            &mut grid,
            &NeighborClassifier::new(),
            0.0,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert_eq!(render_ascii(&grid), "S..\n└─E\n");
    }

    #[test]
    fn test_every_tile_type_has_a_glyph() {
        let mut tile = RoadTile::empty(0, 0);
        for tile_type in TileType::ALL {
            tile.tile_type = tile_type;
            for rotation in [0, 90, 180, 270] {
                tile.rotation = rotation;
                assert_ne!(tile_glyph(&tile), '?');
            }
        }
    }
}
