// src/generator/batch.rs

use crate::error::RoadGenError;
use crate::generator::{GenerationConfig, GenerationReport, RoadNetworkGenerator};
use crate::spawner::{PrefabTable, Scene, SceneSpawner};
use rayon::prelude::*;

/// Outcome of one seed in a batch.
#[derive(Debug)]
pub struct BatchRun {
    pub seed: u64,
    pub result: Result<GenerationReport, RoadGenError>,
}

/// Generate one network per seed in parallel. Every run gets its own
/// generator, RNG and scene; results come back in `seeds` order.
pub fn generate_batch(
    config: &GenerationConfig,
    prefabs: &PrefabTable,
    seeds: &[u64],
) -> Vec<BatchRun> {
    seeds
        .par_iter()
        .map(|&seed| {
            let run_config = GenerationConfig {
                random_seed: seed,
                ..config.clone()
            };
            let spawner = SceneSpawner::new(prefabs.clone(), Scene::shared());
            let mut generator = RoadNetworkGenerator::with_defaults(run_config, Box::new(spawner));
            BatchRun {
                seed,
                result: generator.generate(),
            }
        })
        .collect()
}
