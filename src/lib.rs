#![cfg_attr(feature = "no_std", no_std)]

//! A Redux-style synchronous observable store, with a counter component
//! built on top of it, with `no_std` support.
//!
//! State lives in a [`Store`]: a reducer-driven container whose only mutation
//! path is [`Store::dispatch`]. Subscribers are notified synchronously after
//! each mutation, in subscription order, so a view re-renders with the exact
//! current value before `dispatch` returns. Data flows one way: the view
//! reads a snapshot, renders it, user interaction dispatches an action, the
//! reducer produces the next state, subscribers re-render.
//!
//! The counter component uses the store end to end: [`CounterState`] holds a
//! single signed integer starting at 0, [`CounterAction`] offers `Increment`
//! and `Decrement`, and [`CounterView`] renders `"Count: {value}"` with two
//! labeled triggers onto any [`Renderer`].
//!
//! ## Example
//!
//! ```rust
//! use tally::{counter_store, CounterProps, CounterView, Renderer};
//!
//! struct ConsoleRenderer;
//!
//! impl Renderer<CounterProps> for ConsoleRenderer {
//!     fn render(&mut self, props: CounterProps) {
//!         println!("{}", props.heading);
//!     }
//! }
//!
//! let store = counter_store();
//! assert_eq!(store.state().count, 0);
//!
//! let mut view = CounterView::new(store.clone(), ConsoleRenderer);
//! view.mount(); // renders "Count: 0"
//!
//! // Activating a trigger is how a user interaction lands; dispatching on
//! // the store directly does the same thing.
//! store.dispatch(tally::CounterAction::Increment); // renders "Count: 1"
//! store.dispatch(tally::CounterAction::Decrement); // renders "Count: 0"
//!
//! view.unmount();
//! ```

#[cfg(feature = "no_std")]
extern crate alloc;

// Module declarations
mod counter;
mod renderer;
mod store;
mod view;

// Public re-exports
pub use counter::{counter_store, reduce, CounterAction, CounterState, CounterStore};
pub use renderer::Renderer;
pub use store::{Store, SubscriptionId};
pub use view::{view, CounterProps, CounterView, Trigger};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
