/// Receives events from an integration loop and decides how it should proceed.
///
/// Observers let callers monitor or steer a run without changing its API,
/// enabling logging, trail recording, rendering, or early stopping.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// loop-specific action and `None` lets the loop continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
