//! Demo driver: run a reservoir over random inputs and export to a store.
//!
//! Drives a [`ReservoirNode`] for a number of steps, snapshots its
//! parameters into an in-memory AtomSpace, and optionally saves the
//! store as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin echo-demo
//! cargo run --bin echo-demo -- --units 50 --steps 20 --seed 7 --save atomspace.json
//! cargo run --bin echo-demo -- --config reservoir.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use echo_core::{Matrix, SeedRng};
use echo_reservoir::{ReservoirConfig, ReservoirNode};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = ReservoirConfig::default();
    let mut steps: usize = 10;
    let mut input_dim: usize = 3;
    let mut save_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i < args.len() {
                    // Later flags still override individual fields.
                    config = match load_config(Path::new(&args[i])) {
                        Ok(config) => config,
                        Err(message) => {
                            tracing::error!("{message}");
                            return ExitCode::FAILURE;
                        }
                    };
                }
            }
            "--units" => {
                i += 1;
                if i < args.len() {
                    config.units = args[i].parse().unwrap_or(config.units);
                }
            }
            "--steps" => {
                i += 1;
                if i < args.len() {
                    steps = args[i].parse().unwrap_or(steps);
                }
            }
            "--input-dim" => {
                i += 1;
                if i < args.len() {
                    input_dim = args[i].parse().unwrap_or(input_dim);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    config.seed = args[i].parse().unwrap_or(config.seed);
                }
            }
            "--save" => {
                i += 1;
                if i < args.len() {
                    save_path = Some(PathBuf::from(&args[i]));
                }
            }
            "--help" | "-h" => {
                eprintln!("Usage: echo-demo [OPTIONS]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --config <PATH>  Load a ReservoirConfig from a JSON file");
                eprintln!("  --units <N>      Reservoir units (default: 100)");
                eprintln!("  --steps <N>      Number of driven steps (default: 10)");
                eprintln!("  --input-dim <N>  Input vector dimension (default: 3)");
                eprintln!("  --seed <N>       Weight initialization seed (default: 42)");
                eprintln!("  --save <PATH>    Save the atomspace as JSON after the run");
                eprintln!("  --help           Show this help");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {other}. Use --help for usage.");
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let mut node = match ReservoirNode::with_default_space(config.clone()) {
        Ok(node) => node,
        Err(e) => {
            tracing::error!("cannot build reservoir: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Independent stream for the driving inputs; offset so it doesn't
    // mirror the weight draws.
    let mut input_rng = SeedRng::new(config.seed ^ 0x00c0_ffee);
    tracing::info!(units = config.units, steps, input_dim, "driving reservoir");

    for step in 0..steps {
        let input = Matrix::uniform(&mut input_rng, 1, input_dim, -1.0, 1.0);
        match node.step(&input) {
            Ok(state) => {
                let energy: f64 = state.as_slice().iter().map(|v| v * v).sum();
                tracing::info!(step, energy, "stepped");
            }
            Err(e) => {
                tracing::error!("step {step} failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    match node.export_state() {
        Ok(atoms) => {
            for (param, atom) in &atoms {
                tracing::info!(param = param.as_str(), node_name = atom.name(), "exported");
            }
        }
        Err(e) => {
            tracing::error!("export failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = save_path {
        let space = node.space();
        let result = match space.read() {
            Ok(space) => space.save(&path),
            Err(_) => {
                tracing::error!("atomspace lock poisoned");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = result {
            tracing::error!("save failed: {e}");
            return ExitCode::FAILURE;
        }
        tracing::info!(path = %path.display(), "atomspace saved");
    }

    ExitCode::SUCCESS
}

/// Reads a [`ReservoirConfig`] from a JSON file.
fn load_config(path: &Path) -> Result<ReservoirConfig, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("parse {}: {e}", path.display()))
}
