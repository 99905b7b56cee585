/// Indicates how a transient run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a transient run.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the run terminated.
    pub status: Status,

    /// State after each step, starting with the initial state.
    pub history: Vec<S>,

    /// Number of integration steps completed.
    pub steps: usize,
}

impl<S> Solution<S> {
    /// Returns the last state reached.
    ///
    /// # Panics
    ///
    /// Never in practice: a solution always holds at least the initial state.
    #[must_use]
    pub fn final_state(&self) -> &S {
        self.history
            .last()
            .expect("history always contains the initial state")
    }
}
