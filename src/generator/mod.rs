// src/generator/mod.rs
mod batch;
mod branch;
mod classify;
mod config;
mod orchestrator;
mod path;
mod stats;

pub use batch::{generate_batch, BatchRun};
pub use branch::{BranchGenerator, RandomBranchGenerator};
pub use classify::{classify_grid, NeighborClassifier, TileClassifier};
pub use config::{AppConfig, GenerationConfig};
pub use orchestrator::{GenerationReport, GenerationState, RoadNetworkGenerator, MAX_PATH_ATTEMPTS};
pub use path::{BiasedRandomWalk, PathGenerator, MAX_WALK_STEPS};
pub use stats::{count_components, NetworkStats};
