use nbody_core::{Dynamics, Observer, StepIntegrable, WeightedSum};

use super::{Action, Event, Method, Solution, Status};

/// Integrates `initial` forward for `steps` fixed steps of size `h`.
///
/// # Algorithm
///
/// 1. Record the initial state and emit an [`Event`] for step 0.
/// 2. For each step:
///    - Advance the current state with `method`.
///    - Record the new state.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns [`Action::StopEarly`], terminate.
/// 3. Return the solution with the full history.
///
/// Elapsed time is reported as `step × h` rather than by repeated addition, so
/// event times do not accumulate rounding error.
pub fn solve<S, D, Obs>(
    method: Method,
    dynamics: &D,
    initial: S,
    h: f64,
    steps: usize,
    mut observer: Obs,
) -> Solution<S>
where
    S: StepIntegrable<f64> + Clone,
    S::Derivative: WeightedSum,
    D: Dynamics<S>,
    Obs: Observer<Event<S>, Action>,
{
    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial.clone());

    let event = Event {
        step: 0,
        time: 0.0,
        state: initial.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        };
    }

    let mut current = initial;

    for step in 1..=steps {
        let next = method.step(dynamics, &current, h);
        history.push(next.clone());

        #[allow(clippy::cast_precision_loss)]
        let event = Event {
            step,
            time: step as f64 * h,
            state: next.clone(),
        };

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            };
        }

        current = next;
    }

    Solution {
        status: Status::Complete,
        history,
        steps,
    }
}

/// Integrates without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
pub fn solve_unobserved<S, D>(
    method: Method,
    dynamics: &D,
    initial: S,
    h: f64,
    steps: usize,
) -> Solution<S>
where
    S: StepIntegrable<f64> + Clone,
    S::Derivative: WeightedSum,
    D: Dynamics<S>,
{
    solve(method, dynamics, initial, h, steps, ())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn drift(_: &f64) -> f64 {
        2.0
    }

    #[test]
    fn constant_velocity_motion() {
        let solution = solve_unobserved(Method::ForwardEuler, &drift, 0.0, 0.1, 10);

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 10);
        assert_eq!(solution.history.len(), 11); // initial + 10 steps

        // After 10 steps at v=2, dt=0.1: position = 0 + 2*0.1*10 = 2.0
        assert_relative_eq!(*solution.final_state(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn observer_can_stop_early() {
        let observer = |event: &Event<f64>| {
            if event.step >= 5 {
                Some(Action::StopEarly)
            } else {
                None
            }
        };

        let solution = solve(Method::Rk4, &drift, 0.0, 0.1, 100, observer);

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6); // initial + 5 steps
    }

    #[test]
    fn observer_can_stop_before_the_first_step() {
        let solution = solve(
            Method::Midpoint,
            &drift,
            1.0,
            0.1,
            10,
            |_: &Event<f64>| Some(Action::StopEarly),
        );

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history, vec![1.0]);
    }

    #[test]
    fn zero_steps_returns_initial() {
        let solution = solve_unobserved(Method::Rk4, &drift, 5.0, 0.1, 0);

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history.len(), 1);
        assert_relative_eq!(solution.history[0], 5.0);
    }

    #[test]
    fn step_numbers_and_times() {
        let mut seen = Vec::new();
        solve(
            Method::BackwardEulerApprox,
            &drift,
            0.0,
            0.25,
            4,
            |event: &Event<f64>| {
                seen.push((event.step, event.time));
                None
            },
        );

        assert_eq!(
            seen,
            vec![(0, 0.0), (1, 0.25), (2, 0.5), (3, 0.75), (4, 1.0)]
        );
    }

    #[test]
    fn event_state_matches_history() {
        let decay = |y: &f64| -> f64 { -y };
        let mut states = Vec::new();

        let solution = solve(Method::Rk4, &decay, 1.0, 0.1, 3, |event: &Event<f64>| {
            states.push(event.state);
            None
        });

        assert_eq!(states, solution.history);
    }
}
