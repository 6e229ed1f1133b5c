// src/generator/stats.rs

use crate::grid::RoadGrid;
use crate::map::{Direction, TileType};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

/// Summary of a finished road network.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkStats {
    pub seed: u64,
    pub attempts: u32,
    pub main_path_length: usize,
    pub branch_cells: usize,
    pub occupied_cells: usize,
    pub tile_counts: BTreeMap<TileType, usize>,
    /// Connected groups of road cells. A finished network has exactly one.
    pub components: usize,
    pub generation_time_ms: f64,
}

impl NetworkStats {
    /// Count tiles and components on a classified grid.
    pub fn from_grid(grid: &RoadGrid) -> Self {
        let mut tile_counts = BTreeMap::new();
        for (_, tile) in grid.iter().filter(|(_, t)| t.is_occupied()) {
            *tile_counts.entry(tile.tile_type).or_insert(0) += 1;
        }
        NetworkStats {
            occupied_cells: grid.occupied_count(),
            tile_counts,
            components: count_components(grid),
            ..Default::default()
        }
    }

    pub fn count(&self, tile_type: TileType) -> usize {
        self.tile_counts.get(&tile_type).copied().unwrap_or(0)
    }

    pub fn is_connected(&self) -> bool {
        self.components == 1
    }
}

/// Number of 4-connected groups of occupied cells.
pub fn count_components(grid: &RoadGrid) -> usize {
    let occupied: Vec<_> = grid
        .iter()
        .filter(|(_, t)| t.is_occupied())
        .map(|(p, _)| p)
        .collect();
    if occupied.is_empty() {
        return 0;
    }

    let index: HashMap<_, _> = occupied.iter().enumerate().map(|(i, p)| (*p, i)).collect();
    let mut sets = QuickUnionUf::<UnionBySize>::new(occupied.len());

    for (i, pos) in occupied.iter().enumerate() {
        // North and east cover every adjacent pair once.
        for dir in [Direction::North, Direction::East] {
            if let Some(&j) = index.get(&(*pos + dir.offset())) {
                sets.union(i, j);
            }
        }
    }

    let roots: HashSet<usize> = (0..occupied.len()).map(|i| sets.find(i)).collect();
    roots.len()
}
