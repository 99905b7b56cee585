//! Headless n-body runner.
//!
//! Usage: `nbody-sim [CONFIG.toml] [FRAMES]`
//!
//! Loads the config (defaults when omitted), advances `FRAMES` ticks
//! (default 100), and prints the final bodies to stdout as JSON.

use std::{env, fs, process::ExitCode};

use nbody_core::diagnostics;
use nbody_sim::{Config, Control, Frame, Simulation, init_tracing};
use tracing::{error, info};

const DEFAULT_FRAMES: usize = 100;

/// Frames between progress reports.
const REPORT_EVERY: u64 = 50;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);

    let config = match args.next() {
        Some(path) => {
            info!(%path, "loading config");
            Config::from_toml_str(&fs::read_to_string(&path)?)?
        }
        None => Config::default(),
    };
    let frames = match args.next() {
        Some(frames) => frames.parse()?,
        None => DEFAULT_FRAMES,
    };

    let mut sim = Simulation::new(&config)?;
    let masses = sim.masses().to_vec();
    let energy_start = diagnostics::total_energy(sim.state(), &masses);

    sim.run(frames, |frame: &Frame| -> Option<Control> {
        if frame.step % REPORT_EVERY == 0 {
            info!(
                step = frame.step,
                time = frame.time,
                energy = diagnostics::total_energy(&frame.state, &masses),
                "progress"
            );
        }
        None
    });

    let energy_end = diagnostics::total_energy(sim.state(), &masses);
    info!(time = sim.time(), energy_start, energy_end, "finished");

    println!("{}", serde_json::to_string_pretty(&sim.current_bodies())?);
    Ok(())
}
