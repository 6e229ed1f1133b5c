// src/spawner/mod.rs
mod prefab;
mod scene;

pub use prefab::PrefabTable;
pub use scene::{PlacedObject, Scene, SceneSpawner};

use crate::error::RoadGenError;
use crate::generator::GenerationConfig;
use crate::grid::RoadGrid;

/// Places visual objects for a finished road grid. The spawner owns the
/// objects; each cell only keeps an [`crate::map::InstanceId`] handle.
pub trait RoadSpawner {
    /// Place one object per occupied cell, replacing anything this spawner
    /// placed before. Returns how many objects were placed.
    fn spawn_roads(
        &mut self,
        grid: &mut RoadGrid,
        config: &GenerationConfig,
    ) -> Result<usize, RoadGenError>;

    /// Remove every object this spawner placed.
    fn clear_roads(&mut self);
}
