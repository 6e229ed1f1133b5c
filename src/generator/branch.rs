// src/generator/branch.rs

use crate::error::GridError;
use crate::generator::GenerationConfig;
use crate::grid::util::{available_directions, neighbor_in_direction};
use crate::grid::RoadGrid;
use crate::map::{Direction, TileType};
use crate::utils::geometry::GridPos;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Grows dead-end offshoots from an existing main path.
pub trait BranchGenerator {
    /// Returns every branch cell, flattened. Cells are provisionally marked
    /// occupied in `grid` as they are claimed.
    fn generate_branches(
        &self,
        grid: &mut RoadGrid,
        main_path: &[GridPos],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Result<Vec<GridPos>, GridError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBranchGenerator;

impl RandomBranchGenerator {
    pub fn new() -> Self {
        RandomBranchGenerator
    }

    /// Grow one branch leaving `origin` in `direction`. Empty if the first
    /// cell is off-grid or already taken.
    fn grow_branch(
        grid: &mut RoadGrid,
        origin: GridPos,
        direction: Direction,
        max_length: usize,
        rng: &mut StdRng,
    ) -> Result<Vec<GridPos>, GridError> {
        let mut branch = Vec::new();
        let mut visited = HashSet::new();
        let mut current = neighbor_in_direction(origin, direction);

        if !grid.is_free(current) {
            return Ok(branch);
        }

        for _ in 0..max_length {
            if visited.contains(&current) {
                break;
            }
            branch.push(current);
            visited.insert(current);

            // Claim the cell now so later branches cannot overlap it.
            let tile = grid.at_mut(current)?;
            tile.tile_type = TileType::Straight;
            tile.position = current;

            let options = available_directions(grid, current);
            if options.is_empty() {
                break;
            }
            let next = neighbor_in_direction(current, options[rng.random_range(0..options.len())]);
            if visited.contains(&next) {
                break;
            }
            current = next;
        }

        Ok(branch)
    }
}

impl BranchGenerator for RandomBranchGenerator {
    fn generate_branches(
        &self,
        grid: &mut RoadGrid,
        main_path: &[GridPos],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Result<Vec<GridPos>, GridError> {
        let mut all_branches = Vec::new();
        if main_path.len() < 3 {
            return Ok(all_branches);
        }

        let target_road_count = config.target_road_count();
        let mut road_count = main_path.len();
        let mut branch_count = 0;

        // Start and exit never sprout branches.
        for &origin in &main_path[1..main_path.len() - 1] {
            if branch_count >= config.max_branches || road_count >= target_road_count {
                break;
            }
            if rng.random::<f64>() >= config.branch_probability as f64 {
                continue;
            }

            let options = available_directions(grid, origin);
            if options.is_empty() {
                continue;
            }
            let direction = options[rng.random_range(0..options.len())];
            let length = if config.max_branch_length > config.min_branch_length {
                rng.random_range(config.min_branch_length..=config.max_branch_length)
            } else {
                config.min_branch_length
            };

            let branch = Self::grow_branch(grid, origin, direction, length, rng)?;
            if branch.is_empty() {
                continue;
            }

            debug!(
                "Branch {} from {} heading {}: {} cells",
                branch_count + 1,
                origin,
                direction.name(),
                branch.len()
            );
            road_count += branch.len();
            branch_count += 1;
            all_branches.extend(branch);
        }

        Ok(all_branches)
    }
}
