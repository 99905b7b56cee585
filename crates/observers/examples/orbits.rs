//! Interactive orbit viewer.
//!
//! Runs a simulation and opens a plot window showing every body's path.
//!
//! # Usage
//!
//! ```text
//! cargo run --example orbits --features plot -- binary
//! cargo run --example orbits --features plot -- random 5 42
//! cargo run --example orbits --features plot -- compare
//! ```
//!
//! # Modes
//!
//! - **binary**: Two equal masses on a circular orbit, integrated with RK4.
//!
//! - **random [n] [seed]**: `n` random bodies (default 3) from an optional
//!   seed. Stops early if energy drifts more than 5%.
//!
//! - **compare**: The circular binary integrated once per method at a coarse
//!   step. Forward Euler spirals outward while RK4 stays on the circle.

use std::error::Error;

use nbody_core::{Body, Gravity, Observer, flatten};
use nbody_observers::{DriftGuard, OrbitPlot, ShowConfig};
use nbody_sim::{Config, Control, Frame, Simulation};
use nbody_solvers::transient::{Method, solve_unobserved};

fn main() -> Result<(), Box<dyn Error>> {
    nbody_sim::init_tracing();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "binary".into());
    match mode.as_str() {
        "binary" => binary(),
        "random" => {
            let n = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3);
            let seed = args.next().map(|s| s.parse()).transpose()?;
            random(n, seed)
        }
        "compare" => compare(),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: orbits [binary|random [n] [seed]|compare]");
            std::process::exit(1);
        }
    }
}

fn circular_binary() -> Vec<Body> {
    vec![
        Body::new(-1.0, 0.0, 0.0, -0.5, 1.0),
        Body::new(1.0, 0.0, 0.0, 0.5, 1.0),
    ]
}

fn binary() -> Result<(), Box<dyn Error>> {
    let config = Config {
        body_count: 2,
        bodies: Some(circular_binary()),
        ..Config::default()
    };
    let mut sim = Simulation::new(&config)?;
    let mut plot = OrbitPlot::new();

    sim.run(130, &mut plot);

    plot.show(ShowConfig::new().title("Circular binary (RK4)").legend())?;
    Ok(())
}

fn random(n: usize, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    let config = Config {
        body_count: n,
        seed,
        ..Config::default()
    };
    let mut sim = Simulation::new(&config)?;
    let mut plot = OrbitPlot::new();
    let mut guard = DriftGuard::new(sim.masses().to_vec(), 0.05);

    sim.run(2000, |frame: &Frame| -> Option<Control> {
        plot.record(&frame.state);
        guard.observe(frame)
    });

    plot.show(ShowConfig::new().title(format!("{n} random bodies")).legend())?;
    Ok(())
}

fn compare() -> Result<(), Box<dyn Error>> {
    let gravity = Gravity::new(vec![1.0, 1.0]);
    let mut plot = OrbitPlot::new();

    // One body per method, packed into a single state for plotting.
    let mut paths = Vec::new();
    for method in Method::ALL {
        let solution = solve_unobserved(method, &gravity, flatten(&circular_binary()), 0.2, 60);
        paths.push(solution.history);
    }
    for step in 0..=60 {
        let bodies: Vec<Body> = paths
            .iter()
            .map(|history| history[step].phase(1).with_mass(1.0))
            .collect();
        plot.record(&flatten(&bodies));
    }

    plot.show(ShowConfig::new().title("RK4, Midpoint, Forward Euler, Backward Euler").legend())?;
    Ok(())
}
