use approx::assert_relative_eq;
use nbody_core::{Body, Field, diagnostics};
use nbody_sim::{
    Config, ConfigError, Control, Error, Frame, RunStatus, SeedStrategy, Simulation,
};
use nbody_solvers::transient::Method;

fn binary() -> Vec<Body> {
    vec![
        Body::new(-1.0, 0.0, 0.0, -0.5, 1.0),
        Body::new(1.0, 0.0, 0.0, 0.5, 1.0),
    ]
}

fn binary_sim() -> Simulation {
    let config = Config {
        body_count: 2,
        bodies: Some(binary()),
        seed: Some(5),
        ..Config::default()
    };
    Simulation::new(&config).expect("binary config is valid")
}

#[test]
fn one_rk4_tick_of_the_circular_binary() {
    let mut sim = binary_sim();

    let state = sim.tick().clone();

    let expected = [
        -0.998_750_260_295_031_4,
        -0.049_979_166_657_521_19,
        0.024_989_585_773_655_967,
        -0.499_375_130_147_172_8,
        0.998_750_260_295_031_4,
        0.049_979_166_657_521_19,
        -0.024_989_585_773_655_967,
        0.499_375_130_147_172_8,
    ];
    for (actual, expected) in state.as_slice().iter().zip(expected) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-12);
    }

    // Masses ride alongside, unchanged.
    let bodies = sim.current_bodies();
    assert_eq!(bodies[0].mass, 1.0);
    assert_relative_eq!(bodies[1].x, 0.998_750_260_295_031_4, epsilon = 1e-12);
}

#[test]
fn run_reports_every_frame_until_complete() {
    let mut sim = binary_sim();
    let mut frames = Vec::new();

    let summary = sim.run(5, |frame: &Frame| -> Option<Control> {
        frames.push(frame.clone());
        None
    });

    assert_eq!(summary.status, RunStatus::Complete);
    assert_eq!(summary.frames, 5);
    assert_eq!(sim.steps(), 5);

    let steps: Vec<u64> = frames.iter().map(|f| f.step).collect();
    assert_eq!(steps, [1, 2, 3, 4, 5]);
    assert_relative_eq!(frames[4].time, 0.5, epsilon = 1e-15);
    assert_eq!(&frames[4].state, sim.state());
}

#[test]
fn observer_can_stop_the_run() {
    let mut sim = binary_sim();

    let summary = sim.run(100, |frame: &Frame| {
        (frame.step == 3).then_some(Control::Stop)
    });

    assert_eq!(summary.status, RunStatus::Stopped);
    assert_eq!(summary.frames, 3);
    assert_eq!(sim.steps(), 3);
}

#[test]
fn unit_observer_runs_silently() {
    let mut sim = binary_sim();

    let summary = sim.run(10, ());

    assert_eq!(summary.status, RunStatus::Complete);
    assert!(sim.state().is_finite());
}

#[test]
fn same_seed_gives_the_same_run() {
    let config = Config {
        body_count: 4,
        seed: Some(2024),
        ..Config::default()
    };
    let mut a = Simulation::new(&config).unwrap();
    let mut b = Simulation::new(&config).unwrap();

    assert_eq!(a.bodies(), b.bodies());
    for _ in 0..25 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.state(), b.state());
}

#[test]
fn random_bodies_respect_the_initialization_ranges() {
    let config = Config {
        body_count: 10,
        seed: Some(3),
        ..Config::default()
    };
    let sim = Simulation::new(&config).unwrap();

    assert_eq!(sim.body_count(), 10);
    assert_eq!(sim.state().len(), 40);
    for body in sim.bodies() {
        assert!((-3.0..3.0).contains(&body.x));
        assert!((-2.0..2.0).contains(&body.y));
        assert!((0.1..1.0).contains(&body.mass));
    }
}

#[test]
fn reset_restarts_with_new_bodies() {
    let mut sim = binary_sim();
    sim.tick();
    sim.tick();

    sim.reset(5, SeedStrategy::seeded(9)).unwrap();

    assert_eq!(sim.body_count(), 5);
    assert_eq!(sim.masses().len(), 5);
    assert_eq!(sim.state().len(), 20);
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.time(), 0.0);
    assert_eq!(sim.generation(), 1);

    // A seeded reset is reproducible.
    let first = sim.bodies().to_vec();
    sim.reset(5, SeedStrategy::seeded(9)).unwrap();
    assert_eq!(sim.bodies(), first.as_slice());
    assert_eq!(sim.generation(), 2);
}

#[test]
fn reset_validates_explicit_bodies() {
    let mut sim = binary_sim();

    assert!(matches!(
        sim.reset(3, SeedStrategy::Explicit(binary())),
        Err(Error::Config(ConfigError::BodiesLength {
            expected: 3,
            found: 2
        }))
    ));
    assert!(matches!(
        sim.reset(11, SeedStrategy::default()),
        Err(Error::Config(ConfigError::BodyCount(11)))
    ));

    let mut bodies = binary();
    bodies[0].y = f64::NAN;
    assert!(matches!(
        sim.reset(2, SeedStrategy::Explicit(bodies)),
        Err(Error::Config(ConfigError::NonFiniteBody(0)))
    ));

    assert_eq!(sim.generation(), 0);
    assert_eq!(sim.bodies(), binary().as_slice());
}

#[test]
fn explicit_reset_clamps_masses() {
    let mut sim = binary_sim();
    let mut bodies = binary();
    bodies[1].mass = 0.01;

    sim.reset(2, SeedStrategy::Explicit(bodies)).unwrap();

    assert_eq!(sim.masses(), &[1.0, 0.1]);
}

#[test]
fn set_body_edits_the_initial_condition_and_restarts() {
    let mut sim = binary_sim();
    sim.tick();

    sim.set_body(0, Field::Vx, 0.25).unwrap();

    assert_eq!(sim.bodies()[0].vx, 0.25);
    assert_eq!(sim.state().phase(0).vx, 0.25);
    assert_eq!(sim.state().position(0), [-1.0, 0.0]);
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.generation(), 1);

    sim.set_body_by_name(1, "MASS", 3.0).unwrap();
    assert_eq!(sim.masses(), &[1.0, 3.0]);
    assert_eq!(sim.generation(), 2);
}

#[test]
fn set_body_rejects_bad_input() {
    let mut sim = binary_sim();

    assert!(matches!(
        sim.set_body(7, Field::X, 1.0),
        Err(Error::BodyIndex { index: 7, count: 2 })
    ));
    assert!(matches!(
        sim.set_body(0, Field::X, f64::INFINITY),
        Err(Error::NonFinite { field: Field::X, .. })
    ));
    assert_eq!(sim.generation(), 0);
}

#[test]
fn switching_methods_keeps_the_current_state() {
    let mut sim = binary_sim();
    let masses = sim.masses().to_vec();
    let energy_before = diagnostics::total_energy(sim.state(), &masses);

    for _ in 0..10 {
        sim.tick();
    }
    let mid_run = sim.state().clone();

    sim.set_method_by_name("backward euler").unwrap();

    assert_eq!(sim.method(), Method::BackwardEulerApprox);
    assert_eq!(sim.state(), &mid_run);
    assert_eq!(sim.steps(), 10);
    assert_eq!(sim.generation(), 0);

    for name in ["Midpoint", "forward_euler", "RK4"] {
        sim.set_method_by_name(name).unwrap();
        for _ in 0..10 {
            sim.tick();
        }
    }

    assert!(sim.state().is_finite());
    let energy_after = diagnostics::total_energy(sim.state(), &masses);
    assert_relative_eq!(energy_after, energy_before, max_relative = 0.05);
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config::from_toml_str(
        r#"
        body_count = 3
        scale = 80.0
        method = "ForwardEuler"
        seed = 17
        "#,
    )
    .unwrap();

    let sim = Simulation::new(&config).unwrap();

    assert_eq!(sim.method(), Method::ForwardEuler);
    assert_eq!(sim.scale(), 80.0);
    assert_eq!(sim.body_count(), 3);
}
