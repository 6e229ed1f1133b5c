// src/generator/path.rs

use crate::generator::GenerationConfig;
use crate::grid::util::neighbor_in_direction;
use crate::grid::RoadGrid;
use crate::map::Direction;
use crate::utils::geometry::GridPos;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Walk budget for a single path attempt.
pub const MAX_WALK_STEPS: usize = 10_000;

/// Produces the main route between two cells.
pub trait PathGenerator {
    /// Returns the cells from `start` to `end` inclusive, or an empty vector
    /// if no route was found.
    fn generate_path(
        &self,
        grid: &RoadGrid,
        start: GridPos,
        end: GridPos,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<GridPos>;
}

/// Random walk with backtracking that leans toward the target.
///
/// Each step goes to the neighbor closest to the target with probability
/// `1 - windingness`, otherwise to a uniformly random valid neighbor. When
/// the walk gets stuck it pops cells off the path until it can move again.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiasedRandomWalk;

impl BiasedRandomWalk {
    pub fn new() -> Self {
        BiasedRandomWalk
    }

    fn valid_neighbors(
        grid: &RoadGrid,
        pos: GridPos,
        target: GridPos,
        visited: &HashSet<GridPos>,
    ) -> Vec<GridPos> {
        Direction::ALL
            .iter()
            .map(|d| neighbor_in_direction(pos, *d))
            .filter(|n| grid.contains(*n))
            .filter(|n| *n == target || (!visited.contains(n) && grid.is_free(*n)))
            .collect()
    }

    /// Pop the tail of the path. Fails once only `start` remains.
    fn backtrack(path: &mut Vec<GridPos>, visited: &mut HashSet<GridPos>) -> Option<GridPos> {
        if path.len() <= 1 {
            return None;
        }
        if let Some(last) = path.pop() {
            visited.remove(&last);
        }
        path.last().copied()
    }

    fn choose_next<R: Rng + ?Sized>(
        candidates: &[GridPos],
        target: GridPos,
        windingness: f32,
        rng: &mut R,
    ) -> GridPos {
        if rng.random::<f64>() >= windingness as f64 {
            return Self::closest_to(candidates, target);
        }
        candidates[rng.random_range(0..candidates.len())]
    }

    /// First candidate with the minimum distance to `target`.
    fn closest_to(candidates: &[GridPos], target: GridPos) -> GridPos {
        let mut closest = candidates[0];
        let mut min_dist = closest.distance_to(&target);
        for pos in &candidates[1..] {
            let dist = pos.distance_to(&target);
            if dist < min_dist {
                min_dist = dist;
                closest = *pos;
            }
        }
        closest
    }
}

impl PathGenerator for BiasedRandomWalk {
    fn generate_path(
        &self,
        grid: &RoadGrid,
        start: GridPos,
        end: GridPos,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<GridPos> {
        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        let mut current = start;
        let mut steps = 0;

        while current != end && steps < MAX_WALK_STEPS {
            steps += 1;

            let candidates = Self::valid_neighbors(grid, current, end, &visited);
            if candidates.is_empty() {
                match Self::backtrack(&mut path, &mut visited) {
                    Some(pos) => current = pos,
                    None => {
                        debug!("Walk from {} to {} backtracked past the start", start, end);
                        return Vec::new();
                    }
                }
                continue;
            }

            current = Self::choose_next(&candidates, end, config.path_windingness, rng);
            path.push(current);
            visited.insert(current);
        }

        if current != end {
            debug!("Walk from {} to {} ran out of steps", start, end);
            return Vec::new();
        }

        debug!("Walk reached {} in {} steps, path length {}", end, steps, path.len());
        path
    }
}
