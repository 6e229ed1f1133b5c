// src/spawner/prefab.rs

use crate::map::TileType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Asset names to instantiate for each tile type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabTable {
    assets: BTreeMap<TileType, String>,
}

impl PrefabTable {
    /// A table with no assets at all.
    pub fn empty() -> Self {
        PrefabTable {
            assets: BTreeMap::new(),
        }
    }

    pub fn get(&self, tile_type: TileType) -> Option<&str> {
        self.assets.get(&tile_type).map(String::as_str)
    }

    pub fn set(&mut self, tile_type: TileType, asset: impl Into<String>) {
        self.assets.insert(tile_type, asset.into());
    }

    pub fn remove(&mut self, tile_type: TileType) -> Option<String> {
        self.assets.remove(&tile_type)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for PrefabTable {
    fn default() -> Self {
        let mut table = PrefabTable::empty();
        table.set(TileType::Straight, "road_straight");
        table.set(TileType::Corner, "road_corner");
        table.set(TileType::TIntersection, "road_t_intersection");
        table.set(TileType::FourWay, "road_four_way");
        table.set(TileType::Roundabout, "road_roundabout");
        table.set(TileType::DeadEnd, "road_dead_end");
        table.set(TileType::Start, "road_start");
        table.set(TileType::Exit, "road_exit");
        table
    }
}
