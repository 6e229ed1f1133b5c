// src/generator/orchestrator.rs

use crate::error::RoadGenError;
use crate::generator::{
    classify_grid, BiasedRandomWalk, BranchGenerator, GenerationConfig, NeighborClassifier,
    NetworkStats, PathGenerator, RandomBranchGenerator, TileClassifier,
};
use crate::grid::util::random_edge_position;
use crate::grid::RoadGrid;
use crate::map::{RoadTile, TileType};
use crate::spawner::RoadSpawner;
use crate::utils::geometry::GridPos;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Main path attempts before a run is reported as failed.
pub const MAX_PATH_ATTEMPTS: u32 = 5;

/// Where a generation run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    GridInitialized,
    /// 1-based attempt number.
    MainPathAttempt(u32),
    PathMarked,
    BranchesGenerated,
    BranchesMarked,
    Classified,
    Spawned,
    Failed,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub stats: NetworkStats,
    pub placed_objects: usize,
}

/// Drives a full generation run: grid setup, main path with retries,
/// branches, classification, then placement.
pub struct RoadNetworkGenerator {
    config: GenerationConfig,
    path_generator: Box<dyn PathGenerator>,
    branch_generator: Box<dyn BranchGenerator>,
    classifier: Box<dyn TileClassifier>,
    spawner: Box<dyn RoadSpawner>,

    grid: Option<RoadGrid>,
    main_path: Vec<GridPos>,
    state: GenerationState,
}

impl RoadNetworkGenerator {
    pub fn new(
        config: GenerationConfig,
        path_generator: Box<dyn PathGenerator>,
        branch_generator: Box<dyn BranchGenerator>,
        classifier: Box<dyn TileClassifier>,
        spawner: Box<dyn RoadSpawner>,
    ) -> Self {
        RoadNetworkGenerator {
            config,
            path_generator,
            branch_generator,
            classifier,
            spawner,
            grid: None,
            main_path: Vec::new(),
            state: GenerationState::Idle,
        }
    }

    /// Biased random walk, random branches and the neighbor classifier.
    pub fn with_defaults(config: GenerationConfig, spawner: Box<dyn RoadSpawner>) -> Self {
        Self::new(
            config,
            Box::new(BiasedRandomWalk::new()),
            Box::new(RandomBranchGenerator::new()),
            Box::new(NeighborClassifier::new()),
            spawner,
        )
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// The grid of the last successful run, if any.
    pub fn grid(&self) -> Option<&RoadGrid> {
        self.grid.as_ref()
    }

    /// The cell at `(x, y)`, or an empty default if there is no grid or the
    /// position is outside it.
    pub fn tile_at(&self, x: i32, y: i32) -> RoadTile {
        self.grid
            .as_ref()
            .and_then(|g| g.get(x, y).ok())
            .cloned()
            .unwrap_or_default()
    }

    /// Copy of the last main path, start first.
    pub fn main_path(&self) -> Vec<GridPos> {
        self.main_path.clone()
    }

    /// Remove placed objects and forget the last run.
    pub fn clear(&mut self) {
        self.spawner.clear_roads();
        self.grid = None;
        self.main_path.clear();
        self.state = GenerationState::Idle;
    }

    /// Run with an RNG built from `config.random_seed` (0 draws a fresh seed).
    pub fn generate(&mut self) -> Result<GenerationReport, RoadGenError> {
        let seed = match self.config.random_seed {
            0 => rand::rng().random(),
            seed => seed,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut report = self.generate_with_rng(&mut rng)?;
        report.stats.seed = seed;
        Ok(report)
    }

    /// Run with a caller-owned RNG.
    pub fn generate_with_rng(&mut self, rng: &mut StdRng) -> Result<GenerationReport, RoadGenError> {
        let started = Instant::now();

        if let Err(e) = self.config.validate() {
            self.state = GenerationState::Failed;
            return Err(e.into());
        }

        self.clear();

        let mut grid = RoadGrid::new(self.config.grid_width, self.config.grid_height)?;
        self.state = GenerationState::GridInitialized;

        let Some((main_path, attempts)) = self.try_generate_main_path(&mut grid, rng)? else {
            self.state = GenerationState::Failed;
            return Err(RoadGenError::GenerationFailed {
                attempts: MAX_PATH_ATTEMPTS,
            });
        };

        mark_path(&mut grid, &main_path, true)?;
        self.state = GenerationState::PathMarked;

        let branches = self
            .branch_generator
            .generate_branches(&mut grid, &main_path, &self.config, rng)?;
        self.state = GenerationState::BranchesGenerated;

        mark_path(&mut grid, &branches, false)?;
        self.state = GenerationState::BranchesMarked;

        classify_grid(
            &mut grid,
            self.classifier.as_ref(),
            self.config.roundabout_probability,
            rng,
        )?;
        self.state = GenerationState::Classified;

        let mut stats = NetworkStats::from_grid(&grid);
        if !stats.is_connected() {
            warn!("Road network has {} disconnected components", stats.components);
        }

        let placed_objects = match self.spawner.spawn_roads(&mut grid, &self.config) {
            Ok(placed) => placed,
            Err(e) => {
                // Drop whatever was placed before the error.
                self.spawner.clear_roads();
                self.state = GenerationState::Failed;
                return Err(e);
            }
        };
        self.state = GenerationState::Spawned;

        stats.seed = self.config.random_seed;
        stats.attempts = attempts;
        stats.main_path_length = main_path.len();
        stats.branch_cells = branches.len();
        stats.generation_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        info!(
            "Generated road network: {} main path tiles, {} branch tiles",
            main_path.len(),
            branches.len()
        );

        self.grid = Some(grid);
        self.main_path = main_path;

        Ok(GenerationReport {
            stats,
            placed_objects,
        })
    }

    /// Pick start/exit cells and walk between them, retrying up to
    /// [`MAX_PATH_ATTEMPTS`] times. `None` if every attempt failed.
    fn try_generate_main_path(
        &mut self,
        grid: &mut RoadGrid,
        rng: &mut StdRng,
    ) -> Result<Option<(Vec<GridPos>, u32)>, RoadGenError> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);

        for attempt in 0..MAX_PATH_ATTEMPTS {
            self.state = GenerationState::MainPathAttempt(attempt + 1);

            let start = random_edge_position(self.config.start_edge, width, height, rng);
            let exit = random_edge_position(self.config.exit_edge, width, height, rng);

            if start == exit || start.distance_to(&exit) < 2.0 {
                warn!("Start and exit too close/identical: {} -> {}", start, exit);
                continue;
            }

            if attempt > 0 {
                grid.clear();
            }

            place_endpoint(grid, start, TileType::Start)?;
            place_endpoint(grid, exit, TileType::Exit)?;

            let path = self
                .path_generator
                .generate_path(grid, start, exit, &self.config, rng);

            if path.is_empty() {
                warn!("Path generation attempt {} failed", attempt + 1);
                continue;
            }
            if path.len() < self.config.min_path_length {
                warn!(
                    "Path too short: {} < {}",
                    path.len(),
                    self.config.min_path_length
                );
                continue;
            }

            debug!("Main path found on attempt {}", attempt + 1);
            return Ok(Some((path, attempt + 1)));
        }

        Ok(None)
    }
}

fn place_endpoint(grid: &mut RoadGrid, pos: GridPos, tile_type: TileType) -> Result<(), RoadGenError> {
    let tile = grid.at_mut(pos)?;
    tile.tile_type = tile_type;
    tile.is_main_path = true;
    tile.position = pos;
    Ok(())
}

/// Mark cells as occupied with a placeholder type. Start/Exit keep theirs.
fn mark_path(grid: &mut RoadGrid, path: &[GridPos], is_main_path: bool) -> Result<(), RoadGenError> {
    for &pos in path {
        let tile = grid.at_mut(pos)?;
        if tile.is_special() {
            continue;
        }
        tile.tile_type = TileType::Straight;
        tile.is_main_path = is_main_path;
        tile.position = pos;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::map::GridEdge;
    use crate::spawner::{PrefabTable, Scene, SceneSpawner};
    use parking_lot::RwLock;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::Arc;

    /// Counts spawn calls.
    struct CountingSpawner {
        calls: Rc<Cell<usize>>,
    }

    impl RoadSpawner for CountingSpawner {
        fn spawn_roads(
            &mut self,
            _grid: &mut RoadGrid,
            _config: &GenerationConfig,
        ) -> Result<usize, RoadGenError> {
            self.calls.set(self.calls.get() + 1);
            Ok(0)
        }

        fn clear_roads(&mut self) {}
    }

    /// Places into a real scene, then fails part way through.
    struct FailingSpawner {
        inner: SceneSpawner,
        clears: Rc<Cell<usize>>,
    }

    impl RoadSpawner for FailingSpawner {
        fn spawn_roads(
            &mut self,
            grid: &mut RoadGrid,
            config: &GenerationConfig,
        ) -> Result<usize, RoadGenError> {
            self.inner.spawn_roads(grid, config)?;
            Err(RoadGenError::Spawn("asset store went away".to_string()))
        }

        fn clear_roads(&mut self) {
            self.clears.set(self.clears.get() + 1);
            self.inner.clear_roads();
        }
    }

    fn north_south_config(seed: u64) -> GenerationConfig {
        GenerationConfig {
            grid_width: 10,
            grid_height: 10,
            start_edge: GridEdge::North,
            exit_edge: GridEdge::South,
            path_windingness: 0.0,
            min_path_length: 2,
            random_seed: seed,
            ..Default::default()
        }
    }

    fn scene_generator(config: GenerationConfig) -> (RoadNetworkGenerator, Arc<RwLock<Scene>>) {
        let scene = Scene::shared();
        let spawner = SceneSpawner::new(PrefabTable::default(), Arc::clone(&scene));
        (
            RoadNetworkGenerator::with_defaults(config, Box::new(spawner)),
            scene,
        )
    }

    #[test]
    fn test_north_to_south_end_to_end() {
        let (mut generator, scene) = scene_generator(north_south_config(1234));

        let report = generator.generate().unwrap();

        let path = generator.main_path();
        assert!(!path.is_empty());
        assert_eq!(path[0].y, 9);
        assert_eq!(path.last().unwrap().y, 0);
        let unique: HashSet<GridPos> = path.iter().copied().collect();
        assert_eq!(unique.len(), path.len());

        assert_eq!(generator.state(), GenerationState::Spawned);
        assert_eq!(report.stats.seed, 1234);
        assert_eq!(report.stats.main_path_length, path.len());
        assert_eq!(report.placed_objects, report.stats.occupied_cells);
        assert_eq!(scene.read().len(), report.placed_objects);
    }

    #[test]
    fn test_endpoints_and_classification() {
        // A winding walk can run out of steps on every attempt for some
        // seeds; those runs are allowed to fail.
        let mut succeeded = 0;
        for seed in 1..40 {
            let config = GenerationConfig {
                path_windingness: 0.5,
                ..north_south_config(seed)
            };
            let (mut generator, _scene) = scene_generator(config);
            let Ok(report) = generator.generate() else {
                assert_eq!(generator.state(), GenerationState::Failed);
                assert!(generator.grid().is_none());
                continue;
            };
            succeeded += 1;
            let grid = generator.grid().unwrap();
            let path = generator.main_path();

            assert_eq!(grid.at(path[0]).unwrap().tile_type, TileType::Start);
            assert_eq!(grid.at(*path.last().unwrap()).unwrap().tile_type, TileType::Exit);
            assert!(path.iter().all(|p| grid.at(*p).unwrap().is_main_path));
            assert!(report.stats.is_connected(), "seed {}", seed);

            for (_, tile) in grid.iter() {
                if tile.is_empty() || tile.is_special() {
                    continue;
                }
                let expected = match tile.connection_count() {
                    1 => vec![TileType::DeadEnd],
                    2 => vec![TileType::Straight, TileType::Corner],
                    3 => vec![TileType::TIntersection],
                    4 => vec![TileType::FourWay, TileType::Roundabout],
                    n => panic!("occupied tile with {} connections (seed {})", n, seed),
                };
                assert!(expected.contains(&tile.tile_type), "seed {}", seed);
                assert!(tile.instance.is_some());
            }
        }
        assert!(succeeded >= 30, "only {} of 39 seeds succeeded", succeeded);
    }

    #[test]
    fn test_spawn_failure_removes_partial_objects() {
        let scene = Scene::shared();
        let clears = Rc::new(Cell::new(0));
        let spawner = FailingSpawner {
            inner: SceneSpawner::new(PrefabTable::default(), Arc::clone(&scene)),
            clears: Rc::clone(&clears),
        };
        let mut generator =
            RoadNetworkGenerator::with_defaults(north_south_config(1234), Box::new(spawner));

        let err = generator.generate().unwrap_err();

        assert!(matches!(err, RoadGenError::Spawn(_)));
        assert_eq!(generator.state(), GenerationState::Failed);
        // One clear at the start of the run, one after the failure.
        assert_eq!(clears.get(), 2);
        assert!(scene.read().is_empty());
    }

    #[test]
    fn test_branches_never_reuse_main_path_cells() {
        let config = GenerationConfig {
            grid_width: 15,
            grid_height: 15,
            branch_probability: 1.0,
            max_branches: 20,
            road_density: 0.9,
            ..north_south_config(77)
        };
        let (mut generator, _scene) = scene_generator(config);
        let report = generator.generate().unwrap();

        let main: HashSet<GridPos> = generator.main_path().into_iter().collect();
        let grid = generator.grid().unwrap();
        let branch_cells = grid
            .iter()
            .filter(|(p, t)| t.is_occupied() && !main.contains(p))
            .count();
        assert_eq!(branch_cells, report.stats.branch_cells);
        assert_eq!(
            report.stats.occupied_cells,
            report.stats.main_path_length + report.stats.branch_cells
        );
    }

    #[test]
    fn test_same_seed_same_network() {
        let (mut a, _) = scene_generator(north_south_config(9001));
        let (mut b, _) = scene_generator(north_south_config(9001));
        a.generate().unwrap();
        b.generate().unwrap();

        assert_eq!(a.main_path(), b.main_path());
        let types_a: Vec<_> = a.grid().unwrap().iter().map(|(_, t)| (t.tile_type, t.rotation)).collect();
        let types_b: Vec<_> = b.grid().unwrap().iter().map(|(_, t)| (t.tile_type, t.rotation)).collect();
        assert_eq!(types_a, types_b);
    }

    #[test]
    fn test_unsatisfiable_config_fails_without_spawning() {
        let calls = Rc::new(Cell::new(0));
        let config = GenerationConfig {
            grid_width: 3,
            grid_height: 3,
            min_path_length: 20,
            ..north_south_config(5)
        };
        let mut generator = RoadNetworkGenerator::with_defaults(
            config,
            Box::new(CountingSpawner {
                calls: Rc::clone(&calls),
            }),
        );

        let err = generator.generate().unwrap_err();

        assert!(matches!(
            err,
            RoadGenError::GenerationFailed {
                attempts: MAX_PATH_ATTEMPTS
            }
        ));
        assert_eq!(calls.get(), 0);
        assert_eq!(generator.state(), GenerationState::Failed);
        assert!(generator.grid().is_none());
        assert!(generator.main_path().is_empty());
    }

    #[test]
    fn test_tiny_grid_exhausts_retries() {
        let calls = Rc::new(Cell::new(0));
        let config = GenerationConfig {
            grid_width: 2,
            grid_height: 2,
            min_path_length: 10,
            ..north_south_config(3)
        };
        let mut generator = RoadNetworkGenerator::with_defaults(
            config,
            Box::new(CountingSpawner {
                calls: Rc::clone(&calls),
            }),
        );

        assert!(matches!(
            generator.generate(),
            Err(RoadGenError::GenerationFailed { .. })
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_invalid_config_aborts_before_grid_work() {
        let config = GenerationConfig {
            tile_size: -1.0,
            ..north_south_config(1)
        };
        let (mut generator, scene) = scene_generator(config);

        let err = generator.generate().unwrap_err();

        assert!(matches!(
            err,
            RoadGenError::Config(ConfigError::InvalidTileSize(_))
        ));
        assert!(generator.grid().is_none());
        assert!(scene.read().is_empty());
    }

    #[test]
    fn test_queries_before_and_after_generation() {
        let (mut generator, scene) = scene_generator(north_south_config(42));
        assert_eq!(generator.state(), GenerationState::Idle);
        assert_eq!(generator.tile_at(0, 0), RoadTile::default());
        assert!(generator.main_path().is_empty());

        generator.generate().unwrap();
        let start = generator.main_path()[0];
        assert_eq!(generator.tile_at(start.x, start.y).tile_type, TileType::Start);
        assert_eq!(generator.tile_at(-1, 4), RoadTile::default());
        assert_eq!(generator.tile_at(10, 0), RoadTile::default());

        // The returned path is a copy.
        let mut copy = generator.main_path();
        copy.clear();
        assert!(!generator.main_path().is_empty());

        generator.clear();
        assert!(scene.read().is_empty());
        assert!(generator.grid().is_none());
        assert_eq!(generator.state(), GenerationState::Idle);
    }

    #[test]
    fn test_regeneration_replaces_previous_objects() {
        let (mut generator, scene) = scene_generator(north_south_config(8));
        let first = generator.generate().unwrap();
        assert_eq!(scene.read().len(), first.placed_objects);

        generator.set_config(north_south_config(9));
        let second = generator.generate().unwrap();
        assert_eq!(scene.read().len(), second.placed_objects);
    }

    #[test]
    fn test_explicit_rng_is_reproducible() {
        let (mut a, _) = scene_generator(north_south_config(0));
        let (mut b, _) = scene_generator(north_south_config(0));
        a.generate_with_rng(&mut StdRng::seed_from_u64(31)).unwrap();
        b.generate_with_rng(&mut StdRng::seed_from_u64(31)).unwrap();
        assert_eq!(a.main_path(), b.main_path());
    }
}
