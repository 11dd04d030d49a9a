//! The counter component's state, actions, and reducer.

use crate::Store;

/// A command mutating the counter.
///
/// Both commands are total over the counter domain and cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterAction {
    /// Add one to the value.
    Increment,
    /// Subtract one from the value.
    Decrement,
}

/// The counter's state: a single signed integer, initially 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterState {
    pub count: i64,
}

/// A counter wired to its reducer.
pub type CounterStore = Store<CounterState, CounterAction>;

/// Reduce a counter action to the next state.
///
/// Arithmetic saturates at the `i64` bounds rather than wrapping, so the
/// invariant "N increments and M decrements yield N − M" holds everywhere
/// short of the extremes.
pub fn reduce(state: &CounterState, action: &CounterAction) -> CounterState {
    match action {
        CounterAction::Increment => CounterState {
            count: state.count.saturating_add(1),
        },
        CounterAction::Decrement => CounterState {
            count: state.count.saturating_sub(1),
        },
    }
}

/// Create a counter store at its initial value of 0.
pub fn counter_store() -> CounterStore {
    Store::new(CounterState::default(), reduce)
}
