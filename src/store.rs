//! Generic synchronous observable store.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::vec::Vec;

use flume::{Receiver, Sender};
use portable_atomic::{AtomicBool, AtomicU64, Ordering};
use portable_atomic_util::Arc;
use spin::Mutex;

type Reducer<State, Action> = Box<dyn Fn(&State, &Action) -> State + Send + Sync>;
type Callback<State> = Arc<Box<dyn Fn(&State) + Send + Sync>>;

/// Identifies a single subscription on a [`Store`].
///
/// Returned by [`Store::subscribe`]; pass it to [`Store::unsubscribe`] when
/// the consumer is torn down. Ids are never reused by the same store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber<State> {
    id: SubscriptionId,
    callback: Callback<State>,
}

/// A synchronous, reducer-driven observable store.
///
/// The store is the sole owner of its state. All mutation goes through
/// [`dispatch`](Self::dispatch), which applies the reducer and then notifies
/// subscribers in subscription order, synchronously, after the new state is
/// in place. Reads via [`state`](Self::state) return a snapshot; consumers
/// never hold a reference into the store.
///
/// `Store` is a cheap-to-clone handle. Clones share the same state, so a
/// handle can be moved into view callbacks the same way an event emitter
/// would be, and dispatched from wherever the interaction lands.
///
/// Dispatching from inside a subscriber callback is allowed: the action is
/// queued on a lock-free channel and applied after the current notification
/// pass completes, still within the outermost `dispatch` call. Only one
/// mutation is ever in flight.
///
/// # Example
///
/// ```rust
/// use tally::Store;
///
/// #[derive(Clone)]
/// struct Tally { total: i64 }
///
/// enum Delta { Add(i64) }
///
/// let store = Store::new(Tally { total: 0 }, |state: &Tally, action: &Delta| {
///     match action {
///         Delta::Add(n) => Tally { total: state.total + n },
///     }
/// });
///
/// store.dispatch(Delta::Add(5));
/// assert_eq!(store.state().total, 5);
/// ```
pub struct Store<State, Action> {
    inner: Arc<StoreInner<State, Action>>,
}

struct StoreInner<State, Action> {
    state: Mutex<State>,
    reducer: Reducer<State, Action>,
    subscribers: Mutex<Vec<Subscriber<State>>>,
    next_subscription: AtomicU64,
    actions_tx: Sender<Action>,
    actions_rx: Receiver<Action>,
    draining: AtomicBool,
}

impl<State, Action> Clone for Store<State, Action> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<State, Action> Store<State, Action>
where
    State: Clone + Send + 'static,
    Action: Send + 'static,
{
    /// Create a store holding `initial`, mutated exclusively by `reducer`.
    ///
    /// The reducer must be pure: given the current state and an action it
    /// returns the next state, with no other observable effect.
    pub fn new<R>(initial: State, reducer: R) -> Self
    where
        R: Fn(&State, &Action) -> State + Send + Sync + 'static,
    {
        let (actions_tx, actions_rx) = flume::unbounded();

        Store {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                reducer: Box::new(reducer),
                subscribers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
                actions_tx,
                actions_rx,
                draining: AtomicBool::new(false),
            }),
        }
    }

    /// Return a snapshot of the current state.
    ///
    /// No side effects and no failure conditions.
    pub fn state(&self) -> State {
        self.inner.state.lock().clone()
    }

    /// Dispatch an action through the reducer.
    ///
    /// The mutation is applied immediately and every subscriber is notified
    /// with the new state before this call returns. Actions dispatched by a
    /// subscriber during notification are queued and applied once the current
    /// pass is done.
    pub fn dispatch(&self, action: Action) {
        self.inner.actions_tx.send(action).ok();

        if self.inner.draining.swap(true, Ordering::Acquire) {
            // A dispatch further up this call stack, or on another thread,
            // is already draining the queue and will apply this action
            // before it returns.
            return;
        }

        loop {
            while let Ok(queued) = self.inner.actions_rx.try_recv() {
                self.apply(queued);
            }
            self.inner.draining.store(false, Ordering::Release);
            if self.inner.actions_rx.is_empty()
                || self.inner.draining.swap(true, Ordering::Acquire)
            {
                break;
            }
        }
    }

    /// Subscribe to state changes.
    ///
    /// `callback` is invoked synchronously after every mutation, with the
    /// state the mutation produced. Subscribers are notified in the order
    /// they subscribed. A subscription made from inside a callback takes
    /// effect from the next dispatch.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        let callback: Callback<State> = Arc::new(Box::new(callback));
        self.inner.subscribers.lock().push(Subscriber { id, callback });
        id
    }

    /// Remove a subscription.
    ///
    /// The callback is dropped and receives no further notifications.
    /// Unknown ids are ignored, so unsubscribing twice is harmless.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.subscribers.lock().retain(|s| s.id != id);
    }

    fn apply(&self, action: Action) {
        let snapshot = {
            let mut state = self.inner.state.lock();
            *state = (self.inner.reducer)(&*state, &action);
            state.clone()
        };

        // Notify against a snapshot of the subscriber list so callbacks may
        // subscribe or unsubscribe without touching the pass in flight.
        let subscribers: Vec<Callback<State>> = {
            let guard = self.inner.subscribers.lock();
            guard.iter().map(|s| s.callback.clone()).collect()
        };

        for callback in subscribers {
            (*callback)(&snapshot);
        }
    }
}
