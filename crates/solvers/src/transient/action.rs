/// Control actions an observer can return from a transient run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop integrating and return the history so far.
    StopEarly,
}
