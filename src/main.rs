//! # procedural_roads
//!
//! Command line front end for the road network generator. Loads a JSON config
//! (or the built-in defaults), applies command-line overrides, generates one
//! network or a parallel batch, and prints the result as box-drawing text.
//!
//! ## License
//! Licensed under the MIT License.

use clap::Parser;
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use procedural_roads::cli::CliArgs;
use procedural_roads::generator::{generate_batch, AppConfig, NetworkStats, RoadNetworkGenerator};
use procedural_roads::map::TileType;
use procedural_roads::preview::{render_ascii, render_png};
use procedural_roads::spawner::{Scene, SceneSpawner};

fn load_config(args: &CliArgs) -> Result<AppConfig, Box<dyn Error>> {
    let mut app = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    app.apply_cli_overrides(args);
    Ok(app)
}

fn print_stats(stats: &NetworkStats, as_json: bool) -> Result<(), Box<dyn Error>> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }
    println!(
        "seed {} | attempts {} | main path {} | branch cells {} | {:.2} ms",
        stats.seed,
        stats.attempts,
        stats.main_path_length,
        stats.branch_cells,
        stats.generation_time_ms
    );
    for tile_type in TileType::ALL {
        let count = stats.count(tile_type);
        if count > 0 {
            println!("  {:<14} {}", tile_type.name(), count);
        }
    }
    Ok(())
}

fn run_single(app: &AppConfig, args: &CliArgs) -> Result<(), Box<dyn Error>> {
    let scene = Scene::shared();
    let spawner = SceneSpawner::new(app.prefabs.clone(), Arc::clone(&scene));
    let mut generator = RoadNetworkGenerator::with_defaults(app.generation.clone(), Box::new(spawner));

    let report = generator.generate()?;
    let Some(grid) = generator.grid() else {
        return Err("generation succeeded without a grid".into());
    };

    print!("{}", render_ascii(grid));
    print_stats(&report.stats, args.stats_json)?;
    info!("{} objects placed in the scene", scene.read().len());

    if let Some(path) = &args.png {
        render_png(grid, args.cell_px, path)?;
        info!("Wrote preview to {}", path.display());
    }
    Ok(())
}

fn run_batch(app: &AppConfig, args: &CliArgs, count: usize) -> Result<(), Box<dyn Error>> {
    let first = app.generation.random_seed.max(1);
    let seeds: Vec<u64> = (first..first + count as u64).collect();
    let runs = generate_batch(&app.generation, &app.prefabs, &seeds);

    let mut failures = 0;
    for run in &runs {
        match &run.result {
            Ok(report) => print_stats(&report.stats, args.stats_json)?,
            Err(e) => {
                failures += 1;
                error!("seed {}: {}", run.seed, e);
            }
        }
    }
    info!("Batch finished: {} ok, {} failed", runs.len() - failures, failures);
    if failures == runs.len() {
        return Err("every run in the batch failed".into());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let app = match load_config(&args) {
        Ok(app) => app,
        Err(e) => {
            // Logging is not up yet.
            eprintln!("procedural_roads: {}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&app.log_level))
        .init();
    info!("procedural_roads starting...");

    let result = match args.batch {
        Some(count) if count > 0 => run_batch(&app, &args, count),
        _ => run_single(&app, &args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
