// src/spawner/scene.rs

use crate::error::RoadGenError;
use crate::generator::GenerationConfig;
use crate::grid::util::grid_to_world;
use crate::grid::RoadGrid;
use crate::map::{InstanceId, TileType};
use crate::spawner::{PrefabTable, RoadSpawner};
use crate::utils::geometry::{GridPos, WorldPos};
use log::{debug, warn};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// One object instantiated into the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedObject {
    pub id: InstanceId,
    pub name: String,
    pub asset: String,
    pub tile_type: TileType,
    pub cell: GridPos,
    pub position: WorldPos,
    /// Degrees around the vertical axis.
    pub rotation_y: f32,
}

/// A flat list of placed objects, standing in for an engine scene graph.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<PlacedObject>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, so a caller can keep looking at the scene while a
    /// spawner owned by the generator writes into it.
    pub fn shared() -> Arc<RwLock<Scene>> {
        Arc::new(RwLock::new(Scene::new()))
    }

    pub fn instantiate(
        &mut self,
        name: String,
        asset: &str,
        tile_type: TileType,
        cell: GridPos,
        position: WorldPos,
        rotation_y: f32,
    ) -> InstanceId {
        self.next_id += 1;
        let id = InstanceId(self.next_id);
        self.objects.push(PlacedObject {
            id,
            name,
            asset: asset.to_string(),
            tile_type,
            cell,
            position,
            rotation_y,
        });
        id
    }

    pub fn destroy(&mut self, id: InstanceId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    pub fn get(&self, id: InstanceId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Places one prefab per occupied cell into a [`Scene`].
pub struct SceneSpawner {
    prefabs: PrefabTable,
    scene: Arc<RwLock<Scene>>,
    spawned: Vec<InstanceId>,
    spawn_calls: usize,
}

impl SceneSpawner {
    pub fn new(prefabs: PrefabTable, scene: Arc<RwLock<Scene>>) -> Self {
        SceneSpawner {
            prefabs,
            scene,
            spawned: Vec::new(),
            spawn_calls: 0,
        }
    }

    pub fn scene(&self) -> Arc<RwLock<Scene>> {
        Arc::clone(&self.scene)
    }

    /// Instances this spawner currently owns.
    pub fn spawned(&self) -> &[InstanceId] {
        &self.spawned
    }

    pub fn spawn_calls(&self) -> usize {
        self.spawn_calls
    }
}

impl RoadSpawner for SceneSpawner {
    fn spawn_roads(
        &mut self,
        grid: &mut RoadGrid,
        config: &GenerationConfig,
    ) -> Result<usize, RoadGenError> {
        self.clear_roads();
        self.spawn_calls += 1;

        let mut scene = self.scene.write();
        for pos in grid.all_positions() {
            let tile = grid.at_mut(pos)?;
            if tile.is_empty() {
                continue;
            }

            let Some(asset) = self.prefabs.get(tile.tile_type) else {
                warn!("No prefab assigned for {} at {}", tile.tile_type, pos);
                continue;
            };

            let position = grid_to_world(pos.x, pos.y, config);
            let name = format!("{}_{}_{}", tile.tile_type, pos.x, pos.y);
            let id = scene.instantiate(
                name,
                asset,
                tile.tile_type,
                pos,
                position,
                tile.rotation as f32,
            );
            tile.instance = Some(id);
            self.spawned.push(id);
        }

        debug!("Placed {} road objects", self.spawned.len());
        Ok(self.spawned.len())
    }

    fn clear_roads(&mut self) {
        if self.spawned.is_empty() {
            return;
        }
        let mut scene = self.scene.write();
        for id in self.spawned.drain(..) {
            scene.destroy(id);
        }
    }
}
