/// Event emitted by [`solve`](super::solve) for each state in the run.
///
/// Step 0 is the initial state before any integration.
/// Steps 1..N are emitted after each integration step.
#[derive(Debug, Clone)]
pub struct Event<S> {
    /// The step number (0 for initial, 1..N for integration steps).
    pub step: usize,

    /// Elapsed simulation time, `step × h`.
    pub time: f64,

    /// The state at this step.
    pub state: S,
}
