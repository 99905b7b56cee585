//! Bounded per-body position history.

use std::collections::VecDeque;

use nbody_core::{Observer, StateVector};
use nbody_sim::Frame;
use nbody_solvers::transient::Event;

/// Number of positions kept per body unless configured otherwise.
pub const DEFAULT_TRAIL_LENGTH: usize = 50;

/// Recent positions of every body, oldest first.
///
/// Each body keeps at most `capacity` positions; recording past that drops
/// the oldest. Trails are discarded whenever the run restarts, which is
/// detected from a [`Frame`]'s generation, from a transient [`Event`] at
/// step 0, or from a change in body count.
///
/// # Example
///
/// ```
/// use nbody_core::Body;
/// use nbody_observers::Trails;
/// use nbody_sim::{Config, Simulation};
///
/// let config = Config {
///     body_count: 2,
///     bodies: Some(vec![
///         Body::new(-1.0, 0.0, 0.0, -0.5, 1.0),
///         Body::new(1.0, 0.0, 0.0, 0.5, 1.0),
///     ]),
///     ..Config::default()
/// };
/// let mut sim = Simulation::new(&config).unwrap();
/// let mut trails = Trails::new(10);
///
/// sim.run(25, &mut trails);
///
/// assert_eq!(trails.trail(0).len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Trails {
    capacity: usize,
    generation: Option<u64>,
    trails: Vec<VecDeque<[f64; 2]>>,
}

impl Trails {
    /// Creates empty trails holding up to `capacity` positions per body.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "trail capacity must be positive");
        Self {
            capacity,
            generation: None,
            trails: Vec::new(),
        }
    }

    /// Records the positions in `state` for the given run generation.
    ///
    /// Existing history is discarded first if `generation` differs from the
    /// last one recorded or if the body count changed.
    pub fn record(&mut self, generation: u64, state: &StateVector) {
        if self.generation != Some(generation) || self.trails.len() != state.body_count() {
            self.reset(state.body_count());
            self.generation = Some(generation);
        }

        for (trail, position) in self.trails.iter_mut().zip(state.positions()) {
            if trail.len() == self.capacity {
                trail.pop_front();
            }
            trail.push_back(position);
        }
    }

    /// Discards all history.
    pub fn clear(&mut self) {
        self.generation = None;
        self.trails.clear();
    }

    /// Returns the trail for body `i`, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a recorded body.
    #[must_use]
    pub fn trail(&self, i: usize) -> &VecDeque<[f64; 2]> {
        &self.trails[i]
    }

    /// Iterates over every body's trail in body order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &VecDeque<[f64; 2]>> {
        self.trails.iter()
    }

    /// Returns the number of bodies being tracked.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.trails.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the generation the current trails belong to.
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    fn reset(&mut self, body_count: usize) {
        self.trails = (0..body_count)
            .map(|_| VecDeque::with_capacity(self.capacity))
            .collect();
    }
}

impl Default for Trails {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LENGTH)
    }
}

impl<A> Observer<Frame, A> for Trails {
    fn observe(&mut self, frame: &Frame) -> Option<A> {
        self.record(frame.generation, &frame.state);
        None
    }
}

impl<A> Observer<Event<StateVector>, A> for Trails {
    fn observe(&mut self, event: &Event<StateVector>) -> Option<A> {
        if event.step == 0 {
            self.clear();
        }
        self.record(0, &event.state);
        None
    }
}

/// Allows `&mut Trails` to be passed to loops that take an observer by value,
/// so the trails can be read once the loop returns.
impl<E, A> Observer<E, A> for &mut Trails
where
    Trails: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use nbody_core::{Body, Gravity, flatten};
    use nbody_solvers::transient::{Action, Method, solve};

    use super::*;

    fn state(positions: &[[f64; 2]]) -> StateVector {
        let bodies: Vec<Body> = positions
            .iter()
            .map(|&[x, y]| Body::new(x, y, 0.0, 0.0, 1.0))
            .collect();
        flatten(&bodies)
    }

    #[test]
    fn keeps_only_the_most_recent_positions() {
        let mut trails = Trails::new(3);

        for i in 0..5 {
            let x = f64::from(i);
            trails.record(0, &state(&[[x, 0.0], [0.0, x]]));
        }

        let first: Vec<_> = trails.trail(0).iter().copied().collect();
        assert_eq!(first, [[2.0, 0.0], [3.0, 0.0], [4.0, 0.0]]);
        assert_eq!(trails.trail(1).back(), Some(&[0.0, 4.0]));
    }

    #[test]
    fn new_generation_discards_history() {
        let mut trails = Trails::default();
        trails.record(0, &state(&[[1.0, 1.0], [2.0, 2.0]]));
        trails.record(0, &state(&[[1.5, 1.0], [2.5, 2.0]]));

        trails.record(1, &state(&[[9.0, 9.0], [8.0, 8.0]]));

        assert_eq!(trails.generation(), Some(1));
        assert_eq!(trails.trail(0).len(), 1);
        assert_eq!(trails.trail(0)[0], [9.0, 9.0]);
    }

    #[test]
    fn body_count_change_discards_history() {
        let mut trails = Trails::default();
        trails.record(4, &state(&[[1.0, 1.0], [2.0, 2.0]]));

        trails.record(4, &state(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]));

        assert_eq!(trails.body_count(), 3);
        assert!(trails.iter().all(|t| t.len() == 1));
    }

    #[test]
    fn clears_at_the_start_of_each_solve() {
        let bodies = [
            Body::new(-1.0, 0.0, 0.0, -0.5, 1.0),
            Body::new(1.0, 0.0, 0.0, 0.5, 1.0),
        ];
        let gravity = Gravity::new(vec![1.0, 1.0]);
        let mut trails = Trails::new(100);

        let solution = solve(Method::Rk4, &gravity, flatten(&bodies), 0.1, 20, &mut trails);
        assert_eq!(solution.steps, 20);
        assert_eq!(trails.trail(0).len(), 21);

        let _: Option<Action> = trails.observe(&Event {
            step: 0,
            time: 0.0,
            state: flatten(&bodies),
        });
        assert_eq!(trails.trail(0).len(), 1);
        assert_eq!(trails.trail(1)[0], [1.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "trail capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = Trails::new(0);
    }
}
