// src/preview/png.rs

use crate::error::RoadGenError;
use crate::grid::util::has_road_neighbor;
use crate::grid::RoadGrid;
use crate::map::{Direction, TileType};
use image::{Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([34, 40, 49]);

pub fn tile_color(tile_type: TileType) -> Rgb<u8> {
    match tile_type {
        TileType::None => BACKGROUND,
        TileType::Straight => Rgb([189, 195, 199]),
        TileType::Corner => Rgb([149, 165, 166]),
        TileType::TIntersection => Rgb([52, 152, 219]),
        TileType::FourWay => Rgb([155, 89, 182]),
        TileType::Roundabout => Rgb([241, 196, 15]),
        TileType::DeadEnd => Rgb([231, 76, 60]),
        TileType::Start => Rgb([46, 204, 113]),
        TileType::Exit => Rgb([230, 126, 34]),
    }
}

/// Draw the grid with `cell_px` pixels per cell, north up. Each road cell
/// gets a center block plus an arm toward every occupied neighbor.
pub fn render_image(grid: &RoadGrid, cell_px: u32) -> RgbImage {
    let cell_px = cell_px.max(3);
    let width = grid.width() as u32 * cell_px;
    let height = grid.height() as u32 * cell_px;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let third = cell_px / 3;
    let (lo, hi) = (third, cell_px - third);

    for (pos, tile) in grid.iter() {
        if tile.is_empty() {
            continue;
        }
        let color = tile_color(tile.tile_type);
        let left = pos.x as u32 * cell_px;
        let top = (grid.height() - 1 - pos.y) as u32 * cell_px;

        let mut fill = |x0: u32, y0: u32, x1: u32, y1: u32| {
            for py in top + y0..top + y1 {
                for px in left + x0..left + x1 {
                    img.put_pixel(px, py, color);
                }
            }
        };

        fill(lo, lo, hi, hi);
        for dir in Direction::ALL {
            if !has_road_neighbor(grid, pos, dir) {
                continue;
            }
            match dir {
                Direction::North => fill(lo, 0, hi, lo),
                Direction::South => fill(lo, hi, hi, cell_px),
                Direction::East => fill(hi, lo, cell_px, hi),
                Direction::West => fill(0, lo, lo, hi),
            }
        }
    }

    img
}

/// Render and write a PNG preview to `path`.
pub fn render_png(grid: &RoadGrid, cell_px: u32, path: &Path) -> Result<(), RoadGenError> {
    render_image(grid, cell_px).save(path)?;
    Ok(())
}
